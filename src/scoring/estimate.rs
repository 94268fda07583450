//! Per-pattern guess estimates.
//!
//! Every estimate is at least 1. Linear values saturate at `f64::MAX`; the
//! log10 value is carried alongside so long passwords keep their precision.

use crate::options::Config;
use crate::types::{
    DictionaryPattern, DictionaryVariations, Match, MatchPattern, RegexName, RegexPattern,
    ScoredMatch, SequencePattern, SpatialPattern,
};

/// Floor for a single character match that does not span the password.
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
/// Floor for a longer match that does not span the password.
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;
/// Smallest year distance used for dates and recent years.
pub const MIN_YEAR_SPACE: f64 = 20.0;

const BRUTEFORCE_DIGITS: u32 = 10;
const BRUTEFORCE_LOWER: u32 = 26;
const BRUTEFORCE_UPPER: u32 = 26;
const BRUTEFORCE_SYMBOLS: u32 = 33;
const BRUTEFORCE_OTHER: u32 = 100;

/// Scores `candidate` as part of a password of `password_len` code points.
pub(crate) fn estimate_guesses(
    candidate: Match,
    password_len: usize,
    config: &Config,
) -> ScoredMatch {
    let token: Vec<char> = candidate.token.chars().collect();
    let min_guesses = if token.len() < password_len {
        if token.len() == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };

    let mut variations = None;
    let (guesses, guesses_log10) = match &candidate.pattern {
        MatchPattern::Bruteforce => bruteforce_guesses(&token),
        MatchPattern::Dictionary(d) => {
            let v = dictionary_variations(d, &token);
            variations = Some(v);
            let reversed = if d.reversed { 2.0 } else { 1.0 };
            let raw = v.base_guesses * v.uppercase_variations * v.l33t_variations * reversed;
            floored(raw, min_guesses)
        }
        MatchPattern::Spatial(s) => floored(spatial_guesses(s, &token, config), min_guesses),
        MatchPattern::Repeat(r) => floored(r.base_guesses * r.repeat_count as f64, min_guesses),
        MatchPattern::Sequence(s) => floored(sequence_guesses(s, &token), min_guesses),
        MatchPattern::Regex(r) => floored(
            regex_guesses(r, &candidate.token, config.reference_year),
            min_guesses,
        ),
        MatchPattern::Date(d) => {
            let separator = if d.separator.is_empty() { 1.0 } else { 4.0 };
            floored(year_space(d.year, config.reference_year) * 365.0 * separator, min_guesses)
        }
    };

    ScoredMatch {
        candidate,
        variations,
        guesses,
        guesses_log10,
    }
}

pub(crate) fn saturate(guesses: f64) -> f64 {
    if guesses.is_finite() { guesses } else { f64::MAX }
}

fn floored(raw: f64, min_guesses: f64) -> (f64, f64) {
    let guesses = saturate(raw.max(min_guesses));
    (guesses, guesses.log10())
}

/// Binomial coefficient, computed iteratively in floating point.
pub fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut r = 1.0;
    let mut count = n as f64;
    for d in 1..=k {
        r *= count;
        r /= d as f64;
        count -= 1.0;
    }
    r
}

fn year_space(year: i32, reference_year: i32) -> f64 {
    f64::from((year - reference_year).abs()).max(MIN_YEAR_SPACE)
}

fn bruteforce_guesses(token: &[char]) -> (f64, f64) {
    let cardinality = bruteforce_cardinality(token);
    let log10 = token.len() as f64 * f64::from(cardinality).log10();
    let floor = if token.len() == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    if log10 < floor.log10() {
        (floor, floor.log10())
    } else {
        let exponent = i32::try_from(token.len()).unwrap_or(i32::MAX);
        (saturate(f64::from(cardinality).powi(exponent)), log10)
    }
}

/// Size of the alphabet spanned by the character classes present in `token`.
pub fn bruteforce_cardinality(token: &[char]) -> u32 {
    let mut classes = [false; 5];
    for c in token {
        let class = if c.is_ascii_digit() {
            0
        } else if c.is_ascii_lowercase() {
            1
        } else if c.is_ascii_uppercase() {
            2
        } else if c.is_ascii_punctuation() || *c == ' ' {
            3
        } else {
            4
        };
        classes[class] = true;
    }
    [
        BRUTEFORCE_DIGITS,
        BRUTEFORCE_LOWER,
        BRUTEFORCE_UPPER,
        BRUTEFORCE_SYMBOLS,
        BRUTEFORCE_OTHER,
    ]
    .iter()
    .zip(classes)
    .filter(|(_, present)| *present)
    .map(|(size, _)| size)
    .sum()
}

fn dictionary_variations(pattern: &DictionaryPattern, token: &[char]) -> DictionaryVariations {
    DictionaryVariations {
        base_guesses: pattern.rank as f64,
        uppercase_variations: uppercase_variations(token),
        l33t_variations: l33t_variations(pattern, token),
    }
}

/// Capitalized first letter and nothing else upper-case.
pub(crate) fn starts_upper(token: &[char]) -> bool {
    match token.split_first() {
        Some((first, rest)) => first.is_uppercase() && !rest.is_empty() && !has_upper(rest),
        None => false,
    }
}

fn ends_upper(token: &[char]) -> bool {
    match token.split_last() {
        Some((last, rest)) => last.is_uppercase() && !rest.is_empty() && !has_upper(rest),
        None => false,
    }
}

/// No lower-case letter at all.
pub(crate) fn all_upper(token: &[char]) -> bool {
    !token.is_empty() && !token.iter().any(|c| c.is_lowercase())
}

pub(crate) fn has_upper(token: &[char]) -> bool {
    token.iter().any(|c| c.is_uppercase())
}

/// Ways to capitalize a word: 1 when all lower-case, 2 for the common
/// shapes (first, last or every letter), otherwise every mix of at most
/// `min(upper, lower)` upper-case letters.
pub fn uppercase_variations(token: &[char]) -> f64 {
    if !has_upper(token) {
        return 1.0;
    }
    if starts_upper(token) || ends_upper(token) || all_upper(token) {
        return 2.0;
    }
    let upper = token.iter().filter(|c| c.is_uppercase()).count();
    let lower = token.iter().filter(|c| c.is_lowercase()).count();
    (1..=upper.min(lower)).map(|i| n_ck(upper + lower, i)).sum()
}

/// Ways the leet substitutions of a match could have been applied.
pub fn l33t_variations(pattern: &DictionaryPattern, token: &[char]) -> f64 {
    if !pattern.l33t {
        return 1.0;
    }
    let lowered: Vec<char> = token.iter().copied().map(crate::matching::fold_case).collect();
    pattern
        .sub
        .iter()
        .map(|(&subbed, &unsubbed)| {
            let s = lowered.iter().filter(|&&c| c == subbed).count();
            let u = lowered.iter().filter(|&&c| c == unsubbed).count();
            if s == 0 || u == 0 {
                2.0
            } else {
                (1..=s.min(u)).map(|i| n_ck(s + u, i)).sum()
            }
        })
        .product()
}

fn spatial_guesses(pattern: &SpatialPattern, token: &[char], config: &Config) -> f64 {
    let Some(graph) = config.graphs.get(&pattern.graph) else {
        return bruteforce_guesses(token).0;
    };
    let starting_positions = graph.starting_positions() as f64;
    let average_degree = graph.average_degree();
    let length = token.len();

    let mut guesses = 0.0;
    for i in 2..=length {
        let possible_turns = pattern.turns.min(i - 1);
        for j in 1..=possible_turns {
            guesses += n_ck(i - 1, j - 1) * starting_positions * average_degree.powi(j as i32);
        }
    }

    if pattern.shifted_count > 0 {
        let shifted = pattern.shifted_count;
        let unshifted = length.saturating_sub(shifted);
        if unshifted == 0 {
            guesses *= 2.0;
        } else {
            let variations: f64 = (1..=shifted.min(unshifted))
                .map(|i| n_ck(shifted + unshifted, i))
                .sum();
            guesses *= variations;
        }
    }
    guesses
}

fn sequence_guesses(pattern: &SequencePattern, token: &[char]) -> f64 {
    let obvious_start = matches!(token.first(), Some('a' | 'A' | 'z' | 'Z' | '0' | '1' | '9'));
    let mut base = if obvious_start {
        4.0
    } else {
        f64::from(pattern.sequence_space)
    };
    if !pattern.ascending {
        base *= 2.0;
    }
    base * token.len() as f64
}

fn regex_guesses(pattern: &RegexPattern, token: &str, reference_year: i32) -> f64 {
    match pattern.regex_name {
        RegexName::RecentYear => {
            let year: i32 = token.parse().unwrap_or(reference_year);
            year_space(year, reference_year)
        }
        RegexName::Digits => {
            let exponent = i32::try_from(token.chars().count()).unwrap_or(i32::MAX);
            saturate(10f64.powi(exponent))
        }
    }
}
