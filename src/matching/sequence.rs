//! Sequence matcher - runs with a constant code point step (`abcd`, `9753`).

use crate::types::{Match, MatchPattern, SequenceName, SequencePattern};

/// Largest step between consecutive characters that still reads as a sequence.
const MAX_DELTA: i64 = 5;
const MIN_SEQUENCE_LENGTH: usize = 3;

pub fn find(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    if password.len() < MIN_SEQUENCE_LENGTH {
        return matches;
    }

    let delta_at = |k: usize| password[k] as i64 - password[k - 1] as i64;

    let mut i = 0;
    let mut last_delta = delta_at(1);
    for k in 2..password.len() {
        let delta = delta_at(k);
        if delta != last_delta {
            push_run(password, i, k - 1, last_delta, &mut matches);
            i = k - 1;
            last_delta = delta;
        }
    }
    push_run(password, i, password.len() - 1, last_delta, &mut matches);
    matches
}

fn push_run(password: &[char], i: usize, j: usize, delta: i64, matches: &mut Vec<Match>) {
    if j - i + 1 < MIN_SEQUENCE_LENGTH || delta == 0 || delta.abs() > MAX_DELTA {
        return;
    }
    let (sequence_name, sequence_space) = classify(&password[i..=j]);
    let pattern = SequencePattern {
        sequence_name,
        sequence_space,
        ascending: delta > 0,
    };
    matches.push(Match::new(password, i, j, MatchPattern::Sequence(pattern)));
}

fn classify(token: &[char]) -> (SequenceName, u32) {
    if token.iter().all(char::is_ascii_lowercase) {
        (SequenceName::Lower, 26)
    } else if token.iter().all(char::is_ascii_uppercase) {
        (SequenceName::Upper, 26)
    } else if token.iter().all(char::is_ascii_digit) {
        (SequenceName::Digits, 10)
    } else {
        (SequenceName::Unicode, 26)
    }
}
