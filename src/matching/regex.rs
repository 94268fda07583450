//! Regex matcher - fixed character-class patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Match, MatchPattern, RegexName, RegexPattern};

static RECENT_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"19[0-9]{2}|200[0-9]|201[0-9]|202[0-9]").expect("valid recent year regex")
});

static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2,}").expect("valid digits regex"));

pub fn find(password: &[char]) -> Vec<Match> {
    let text: String = password.iter().collect();
    let char_index = byte_to_char_index(&text);

    [(RegexName::RecentYear, &*RECENT_YEAR), (RegexName::Digits, &*DIGITS)]
        .into_iter()
        .flat_map(|(regex_name, regex)| {
            let char_index = &char_index;
            regex.find_iter(&text).map(move |found| {
                let i = char_index[found.start()];
                let j = char_index[found.end()] - 1;
                Match::new(password, i, j, MatchPattern::Regex(RegexPattern { regex_name }))
            })
        })
        .collect()
}

/// Maps every byte offset of `text` (plus one past the end) to the index of
/// the code point it falls in.
fn byte_to_char_index(text: &str) -> Vec<usize> {
    let mut index = Vec::with_capacity(text.len() + 1);
    for (k, c) in text.chars().enumerate() {
        index.extend(std::iter::repeat_n(k, c.len_utf8()));
    }
    index.push(text.chars().count());
    index
}
