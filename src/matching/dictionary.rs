//! Dictionary matcher - exact, reversed, leet and fuzzy word lookups.

use std::collections::HashSet;

use super::{MatchContext, fold_case};
use crate::dictionary::{RankedDictionary, USER_INPUTS_DICTIONARY};
use crate::l33t::{MAX_L33T_VARIANTS, l33t_variants};
use crate::types::{DictionaryPattern, Match, MatchPattern};

/// Shortest token considered for fuzzy matching.
const MIN_FUZZY_LENGTH: usize = 4;

/// Finds every dictionary explanation of every substring of `password`.
pub fn find(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let lowered: Vec<char> = password.iter().copied().map(fold_case).collect();

    let mut matches = exact(password, &lowered, ctx);
    matches.extend(reversed(password, &lowered, ctx));
    matches.extend(l33t(password, &lowered, ctx));

    if ctx.config.use_levenshtein_distance {
        let explained: HashSet<(usize, usize)> = matches
            .iter()
            .filter(|m| matches!(&m.pattern, MatchPattern::Dictionary(d) if !d.reversed))
            .map(|m| (m.i, m.j))
            .collect();
        matches.extend(fuzzy(password, &lowered, ctx, &explained));
    }
    matches
}

/// `(i, j, word, rank)` for every substring of `chars` found in `dict`.
fn lookup(chars: &[char], dict: &RankedDictionary) -> Vec<(usize, usize, String, usize)> {
    let n = chars.len();
    let width = dict.max_word_len().min(n);
    let mut hits = Vec::new();
    for i in 0..n {
        let mut word = String::new();
        for j in i..(i + width).min(n) {
            word.push(chars[j]);
            if let Some(rank) = dict.rank(&word) {
                hits.push((i, j, word.clone(), rank));
            }
        }
    }
    hits
}

fn exact(password: &[char], lowered: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let mut matches = Vec::new();
    for (name, dict) in ctx.dictionaries() {
        for (i, j, word, rank) in lookup(lowered, dict) {
            let pattern = DictionaryPattern::exact(word, rank, name);
            matches.push(Match::new(password, i, j, MatchPattern::Dictionary(pattern)));
        }
    }
    matches
}

/// Words spelled backwards. Single characters and palindromes are already
/// reported by the forward lookup.
fn reversed(password: &[char], lowered: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let n = lowered.len();
    let backwards: Vec<char> = lowered.iter().rev().copied().collect();
    let mut matches = Vec::new();
    for (name, dict) in ctx.dictionaries() {
        for (i, j, word, rank) in lookup(&backwards, dict) {
            if i == j || word.chars().eq(word.chars().rev()) {
                continue;
            }
            let mut pattern = DictionaryPattern::exact(word, rank, name);
            pattern.reversed = true;
            matches.push(Match::new(
                password,
                n - 1 - j,
                n - 1 - i,
                MatchPattern::Dictionary(pattern),
            ));
        }
    }
    matches
}

/// Words hidden behind leet substitutions. Only matches whose token really
/// contains a substitution are kept.
fn l33t(password: &[char], lowered: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let mut seen: HashSet<(String, usize, usize, String)> = HashSet::new();
    let mut matches = Vec::new();

    for variant in l33t_variants(password, &ctx.config.l33t_table, MAX_L33T_VARIANTS) {
        for (name, dict) in ctx.dictionaries() {
            for (i, j, word, rank) in lookup(&variant.chars, dict) {
                if i == j {
                    continue;
                }
                let token = &lowered[i..=j];
                if token.iter().copied().eq(word.chars()) {
                    continue;
                }
                if !seen.insert((name.to_string(), i, j, word.clone())) {
                    continue;
                }
                let mut pattern = DictionaryPattern::exact(word, rank, name);
                pattern.l33t = true;
                pattern.sub = variant
                    .subs
                    .iter()
                    .filter(|(subbed, _)| token.contains(*subbed))
                    .map(|(&subbed, &letter)| (subbed, letter))
                    .collect();
                matches.push(Match::new(password, i, j, MatchPattern::Dictionary(pattern)));
            }
        }
    }
    matches
}

/// Closest dictionary word within the edit-distance threshold for every
/// substring not otherwise explained.
///
/// User inputs are few and personal, so their threshold grows with the
/// token: `max(threshold, ceil(len / 4))`. Other dictionaries use the
/// configured threshold as is.
fn fuzzy(
    password: &[char],
    lowered: &[char],
    ctx: &MatchContext<'_>,
    explained: &HashSet<(usize, usize)>,
) -> Vec<Match> {
    let n = lowered.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for j in (i + MIN_FUZZY_LENGTH - 1)..n {
            if explained.contains(&(i, j)) {
                continue;
            }
            let len = j - i + 1;
            let token: String = lowered[i..=j].iter().collect();
            for (name, dict, index) in ctx.fuzzy_dictionaries() {
                let threshold = if name == USER_INPUTS_DICTIONARY {
                    ctx.config.levenshtein_threshold.max(len.div_ceil(4))
                } else {
                    ctx.config.levenshtein_threshold
                };
                if len > dict.max_word_len() + threshold {
                    continue;
                }
                let Some((distance, entry)) = index.closest(&token, dict, threshold) else {
                    continue;
                };
                let mut pattern = DictionaryPattern::exact(token.clone(), entry.rank, name);
                pattern.levenshtein_distance = Some(distance);
                pattern.levenshtein_distance_entry = Some(entry.word.clone());
                matches.push(Match::new(password, i, j, MatchPattern::Dictionary(pattern)));
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EstimatorOptions;

    fn run(password: &str, options: EstimatorOptions, user_inputs: &[&str]) -> Vec<Match> {
        let config = options.build().expect("valid options");
        let user = RankedDictionary::from_ordered(user_inputs);
        let ctx = MatchContext::new(&config, &user);
        let chars: Vec<char> = password.chars().collect();
        find(&chars, &ctx)
    }

    fn dict(m: &Match) -> &DictionaryPattern {
        match &m.pattern {
            MatchPattern::Dictionary(d) => d,
            other => panic!("Expected dictionary match, got {:?}", other),
        }
    }

    fn options() -> EstimatorOptions {
        EstimatorOptions::default()
            .with_dictionary("d1", ["motherboard", "mother", "board", "abcd", "cdef"])
            .with_dictionary("d2", ["z", "8", "99", "$", "asdf1234&*"])
    }

    #[test]
    fn test_finds_overlapping_words() {
        let matches = run("motherboard", options(), &[]);
        let words: Vec<(&str, usize, usize)> = matches
            .iter()
            .map(|m| (dict(m).matched_word.as_str(), m.i, m.j))
            .collect();
        assert!(words.contains(&("mother", 0, 5)));
        assert!(words.contains(&("motherboard", 0, 10)));
        assert!(words.contains(&("board", 6, 10)));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_keeps_token() {
        let matches = run("BoaRd", options(), &[]);
        let m = matches.iter().find(|m| !dict(m).reversed).unwrap();
        assert_eq!(m.token, "BoaRd");
        assert_eq!(dict(m).matched_word, "board");
        assert_eq!(dict(m).rank, 3);
        assert_eq!(dict(m).dictionary_name, "d1");
    }

    #[test]
    fn test_overlapping_words_both_reported() {
        let matches = run("abcdef", options(), &[]);
        assert!(matches.iter().any(|m| dict(m).matched_word == "abcd" && m.i == 0 && m.j == 3));
        assert!(matches.iter().any(|m| dict(m).matched_word == "cdef" && m.i == 2 && m.j == 5));
    }

    #[test]
    fn test_user_inputs_dictionary() {
        let matches = run("xyzalicexyz", options(), &["Alice", "bob"]);
        let m = matches
            .iter()
            .find(|m| dict(m).dictionary_name == USER_INPUTS_DICTIONARY)
            .expect("user input match");
        assert_eq!((m.i, m.j), (3, 7));
        assert_eq!(dict(m).rank, 1);
    }

    #[test]
    fn test_reversed_words() {
        let matches = run(
            "0123drowssap",
            EstimatorOptions::default().with_dictionary("passwords", ["password"]),
            &[],
        );
        let m = matches.iter().find(|m| dict(m).reversed).expect("reversed match");
        assert_eq!(m.token, "drowssap");
        assert_eq!(dict(m).matched_word, "password");
        assert_eq!((m.i, m.j), (4, 11));
    }

    #[test]
    fn test_reversed_skips_single_chars_and_palindromes() {
        let matches = run(
            "level z",
            EstimatorOptions::default().with_dictionary("w", ["level", "z"]),
            &[],
        );
        assert!(matches.iter().all(|m| !dict(m).reversed));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_l33t_match_records_substitutions() {
        let matches = run(
            "p4ssw0rd",
            EstimatorOptions::default().with_dictionary("passwords", ["password"]),
            &[],
        );
        let m = matches.iter().find(|m| dict(m).l33t).expect("l33t match");
        assert_eq!(m.token, "p4ssw0rd");
        assert_eq!(dict(m).matched_word, "password");
        assert_eq!(dict(m).sub.get(&'4'), Some(&'a'));
        assert_eq!(dict(m).sub.get(&'0'), Some(&'o'));
        assert_eq!(matches.iter().filter(|m| dict(m).l33t).count(), 1);
    }

    #[test]
    fn test_l33t_ignores_unsubstituted_and_single_chars() {
        let matches = run(
            "b4",
            EstimatorOptions::default().with_dictionary("w", ["a", "b"]),
            &[],
        );
        assert!(matches.iter().all(|m| !dict(m).l33t));
    }

    #[test]
    fn test_fuzzy_disabled_by_default() {
        let matches = run(
            "alaphant",
            EstimatorOptions::default().with_dictionary("passwords", ["elephant"]),
            &[],
        );
        assert!(matches.iter().all(|m| dict(m).levenshtein_distance.is_none()));
    }

    #[test]
    fn test_fuzzy_within_threshold() {
        let matches = run(
            "alaphant",
            EstimatorOptions::default()
                .with_dictionary("passwords", ["elephant"])
                .with_levenshtein(2),
            &[],
        );
        let m = matches
            .iter()
            .find(|m| m.i == 0 && m.j == 7)
            .expect("whole password match");
        assert_eq!(dict(m).levenshtein_distance, Some(2));
        assert_eq!(dict(m).levenshtein_distance_entry.as_deref(), Some("elephant"));
        assert_eq!(dict(m).matched_word, "alaphant");
    }

    #[test]
    fn test_fuzzy_never_reports_distance_zero() {
        let matches = run(
            "elephant",
            EstimatorOptions::default()
                .with_dictionary("passwords", ["elephant", "elephants"])
                .with_levenshtein(2),
            &[],
        );
        let whole: Vec<&Match> = matches.iter().filter(|m| m.i == 0 && m.j == 7).collect();
        assert_eq!(whole.len(), 1);
        assert_eq!(dict(whole[0]).levenshtein_distance, None);
        assert!(matches.iter().all(|m| dict(m).levenshtein_distance != Some(0)));
    }

    #[test]
    fn test_fuzzy_prefers_lowest_rank_on_ties() {
        let matches = run(
            "cart",
            EstimatorOptions::default()
                .with_dictionary("w", ["card", "care", "cars"])
                .with_levenshtein(1),
            &[],
        );
        let m = matches.iter().find(|m| m.i == 0 && m.j == 3).unwrap();
        assert_eq!(dict(m).levenshtein_distance_entry.as_deref(), Some("card"));
        assert_eq!(dict(m).rank, 1);
    }

    #[test]
    fn test_fuzzy_prefers_smaller_distance_over_rank() {
        let matches = run(
            "horsee",
            EstimatorOptions::default()
                .with_dictionary("w", ["morse", "horses"])
                .with_levenshtein(2),
            &[],
        );
        let m = matches.iter().find(|m| m.i == 0 && m.j == 5).unwrap();
        assert_eq!(dict(m).levenshtein_distance, Some(1));
        assert_eq!(dict(m).levenshtein_distance_entry.as_deref(), Some("horses"));
    }

    #[test]
    fn test_fuzzy_skips_short_tokens() {
        let matches = run(
            "cax",
            EstimatorOptions::default()
                .with_dictionary("w", ["cat"])
                .with_levenshtein(2),
            &[],
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_user_input_threshold_grows_with_length() {
        let password = "ishduehlduod83h4mfs8";
        let options = EstimatorOptions::default()
            .with_dictionary("passwords", ["ishduehgldueod83h4mfis8"])
            .with_levenshtein(2);
        let builtin = run(password, options.clone(), &[]);
        assert!(builtin.is_empty());

        let personal = run(
            password,
            EstimatorOptions::default().with_levenshtein(2),
            &["ishduehgldueod83h4mfis8"],
        );
        let m = personal
            .iter()
            .find(|m| m.i == 0 && m.j == 19)
            .expect("user input fuzzy match");
        assert_eq!(dict(m).dictionary_name, USER_INPUTS_DICTIONARY);
        assert_eq!(dict(m).levenshtein_distance, Some(3));
        assert_eq!(dict(m).rank, 1);
    }
}
