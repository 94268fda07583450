//! Date matcher - digit runs that read as day, month and year.
//!
//! Accepts 4 to 8 digits without separators (`13122001`, `1391`) and
//! 6 to 10 characters with a repeated separator (`13/12/2001`, `1.1.91`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DatePattern, Match, MatchPattern};

const DATE_MIN_YEAR: i32 = 1000;
const DATE_MAX_YEAR: i32 = 2050;

static MAYBE_DATE_WITH_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,4})([\s/\\_.\-])([0-9]{1,2})([\s/\\_.\-])([0-9]{1,4})$")
        .expect("valid date regex")
});

/// Where a separator-less token of a given length may be cut into three numbers.
fn splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

pub fn find(password: &[char]) -> Vec<Match> {
    let mut matches = without_separator(password);
    matches.extend(with_separator(password));

    // a date inside a longer date is part of it
    let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.i, m.j)).collect();
    matches.retain(|m| {
        !spans
            .iter()
            .any(|&(i, j)| (i, j) != (m.i, m.j) && i <= m.i && m.j <= j)
    });
    matches
}

fn without_separator(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    let n = password.len();
    for i in 0..n {
        for j in (i + 3)..(i + 8).min(n) {
            let token = &password[i..=j];
            if !token.iter().all(char::is_ascii_digit) {
                continue;
            }
            let text: String = token.iter().collect();

            let mut seen = Vec::new();
            for &(k, l) in splits(token.len()) {
                let ints = [&text[..k], &text[k..l], &text[l..]].map(parse);
                let Some(date) = map_ints_to_dmy(ints) else {
                    continue;
                };
                if !seen.contains(&date) {
                    seen.push(date);
                    matches.push(date_match(password, i, j, "", date));
                }
            }
        }
    }
    matches
}

fn with_separator(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    let n = password.len();
    for i in 0..n {
        for j in (i + 5)..(i + 10).min(n) {
            let token: String = password[i..=j].iter().collect();
            let Some(caps) = MAYBE_DATE_WITH_SEPARATOR.captures(&token) else {
                continue;
            };
            if caps[2] != caps[4] {
                continue;
            }
            let ints = [&caps[1], &caps[3], &caps[5]].map(parse);
            if let Some(date) = map_ints_to_dmy(ints) {
                matches.push(date_match(password, i, j, &caps[2], date));
            }
        }
    }
    matches
}

fn parse(digits: &str) -> i32 {
    // at most 4 ASCII digits, always fits
    digits.parse().unwrap_or_default()
}

fn date_match(
    password: &[char],
    i: usize,
    j: usize,
    separator: &str,
    (year, month, day): (i32, u32, u32),
) -> Match {
    let pattern = DatePattern {
        separator: separator.to_string(),
        year,
        month,
        day,
    };
    Match::new(password, i, j, MatchPattern::Date(pattern))
}

/// Reads three numbers as `(year, month, day)`.
///
/// The year is either first or last. A four digit year in range wins over
/// any two digit reading; two digit years map to 19xx above 50, 20xx otherwise.
fn map_ints_to_dmy(ints: [i32; 3]) -> Option<(i32, u32, u32)> {
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }

    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let year_splits = [(ints[2], [ints[0], ints[1]]), (ints[0], [ints[1], ints[2]])];

    for &(year, rest) in &year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            return map_ints_to_dm(year, rest);
        }
    }

    year_splits.iter().find_map(|&(year, rest)| {
        let year = two_to_four_digit_year(year);
        map_ints_to_dm(year, rest)
    })
}

/// Day and month in either order, checked against the calendar.
fn map_ints_to_dm(year: i32, [a, b]: [i32; 2]) -> Option<(i32, u32, u32)> {
    [(a, b), (b, a)].into_iter().find_map(|(day, month)| {
        let day = u32::try_from(day).ok()?;
        let month = u32::try_from(month).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some((year, month, day))
    })
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}
