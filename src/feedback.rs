//! Warning and suggestion selection.
//!
//! Picks translation keys from the optimal match sequence; the texts
//! themselves come from [`Translations`].

use serde::Serialize;

use crate::dictionary::USER_INPUTS_DICTIONARY;
use crate::scoring::estimate::{all_upper, has_upper, starts_upper};
use crate::translations::Translations;
use crate::types::{DictionaryPattern, MatchPattern, RegexName, ScoredMatch};

/// Highest score that still gets feedback.
const MAX_SCORE_WITH_FEEDBACK: u8 = 2;

/// Dictionary matches at or below this many guesses (log10) read as a
/// variant of a common password.
const SIMILAR_TO_COMMON_LOG10: f64 = 4.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

/// Warning and suggestion keys, before translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FeedbackKeys {
    warning: Option<&'static str>,
    suggestions: Vec<&'static str>,
}

pub(crate) fn get_feedback(
    score: u8,
    sequence: &[ScoredMatch],
    translations: &Translations,
) -> Feedback {
    let keys = select_keys(score, sequence);
    Feedback {
        warning: keys.warning.map(|key| translations.warning(key)),
        suggestions: keys
            .suggestions
            .iter()
            .map(|key| translations.suggestion(key))
            .collect(),
    }
}

fn select_keys(score: u8, sequence: &[ScoredMatch]) -> FeedbackKeys {
    if sequence.is_empty() {
        return FeedbackKeys {
            warning: None,
            suggestions: vec!["useWords", "noNeed"],
        };
    }
    if score > MAX_SCORE_WITH_FEEDBACK {
        return FeedbackKeys::default();
    }

    let mut longest = &sequence[0];
    for m in &sequence[1..] {
        if m.candidate.token_len() > longest.candidate.token_len() {
            longest = m;
        }
    }

    let mut keys = match_feedback(longest, sequence.len() == 1);
    keys.suggestions.insert(0, "anotherWord");
    keys
}

fn match_feedback(m: &ScoredMatch, is_sole_match: bool) -> FeedbackKeys {
    match m.pattern() {
        MatchPattern::Dictionary(d) => dictionary_feedback(m, d, is_sole_match),
        MatchPattern::Spatial(s) => FeedbackKeys {
            warning: Some(if s.turns == 1 { "straightRow" } else { "keyPattern" }),
            suggestions: vec!["longerKeyboardPattern"],
        },
        MatchPattern::Repeat(r) => FeedbackKeys {
            warning: Some(if r.base_token.chars().count() == 1 {
                "simpleRepeat"
            } else {
                "extendedRepeat"
            }),
            suggestions: vec!["repeated"],
        },
        MatchPattern::Sequence(_) => FeedbackKeys {
            warning: Some("sequences"),
            suggestions: vec!["sequences"],
        },
        MatchPattern::Regex(r) if r.regex_name == RegexName::RecentYear => FeedbackKeys {
            warning: Some("recentYears"),
            suggestions: vec!["recentYears", "associatedYears"],
        },
        MatchPattern::Date(_) => FeedbackKeys {
            warning: Some("dates"),
            suggestions: vec!["dates"],
        },
        MatchPattern::Regex(_) | MatchPattern::Bruteforce => FeedbackKeys::default(),
    }
}

fn dictionary_feedback(
    m: &ScoredMatch,
    d: &DictionaryPattern,
    is_sole_match: bool,
) -> FeedbackKeys {
    let name = d.dictionary_name.as_str();
    let warning = if name == "passwords" {
        password_warning(m, d, is_sole_match)
    } else if name.contains("wikipedia") {
        is_sole_match.then_some("wordByItself")
    } else if name == "lastnames" || name.contains("firstnames") {
        Some(if is_sole_match {
            "namesByThemselves"
        } else {
            "commonNames"
        })
    } else if name == USER_INPUTS_DICTIONARY {
        Some("userInputs")
    } else {
        None
    };

    let token: Vec<char> = m.token().chars().collect();
    let mut suggestions = Vec::new();
    if starts_upper(&token) {
        suggestions.push("capitalization");
    } else if all_upper(&token) && has_upper(&token) {
        suggestions.push("allUppercase");
    }
    if d.reversed && token.len() >= 4 {
        suggestions.push("reverseWords");
    }
    if d.l33t {
        suggestions.push("l33t");
    }

    FeedbackKeys {
        warning,
        suggestions,
    }
}

fn password_warning(
    m: &ScoredMatch,
    d: &DictionaryPattern,
    is_sole_match: bool,
) -> Option<&'static str> {
    if is_sole_match && !d.l33t && !d.reversed {
        Some(match d.rank {
            0..=10 => "topTen",
            11..=100 => "topHundred",
            _ => "common",
        })
    } else if m.guesses_log10 <= SIMILAR_TO_COMMON_LOG10 {
        Some("similarToCommon")
    } else {
        None
    }
}
