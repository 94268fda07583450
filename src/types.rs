//! Match records shared by the matchers, the estimator and the feedback step.

use std::collections::BTreeMap;

use serde::Serialize;

/// A matcher's explanation for the password substring `[i, j]` (inclusive,
/// code point indices).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub i: usize,
    pub j: usize,
    pub token: String,
    #[serde(flatten)]
    pub pattern: MatchPattern,
}

impl Match {
    /// Builds a match over `password[i..=j]`.
    pub(crate) fn new(password: &[char], i: usize, j: usize, pattern: MatchPattern) -> Self {
        Self {
            i,
            j,
            token: password[i..=j].iter().collect(),
            pattern,
        }
    }

    /// Length of the token in code points.
    pub fn token_len(&self) -> usize {
        self.j - self.i + 1
    }

    pub fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }
}

/// Pattern-specific data, tagged by `pattern` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pattern", rename_all = "camelCase")]
pub enum MatchPattern {
    Dictionary(DictionaryPattern),
    Spatial(SpatialPattern),
    Repeat(RepeatPattern),
    Sequence(SequencePattern),
    Regex(RegexPattern),
    Date(DatePattern),
    Bruteforce,
}

impl MatchPattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Dictionary(_) => PatternKind::Dictionary,
            Self::Spatial(_) => PatternKind::Spatial,
            Self::Repeat(_) => PatternKind::Repeat,
            Self::Sequence(_) => PatternKind::Sequence,
            Self::Regex(_) => PatternKind::Regex,
            Self::Date(_) => PatternKind::Date,
            Self::Bruteforce => PatternKind::Bruteforce,
        }
    }
}

/// Fieldless mirror of [`MatchPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    Dictionary,
    Spatial,
    Repeat,
    Sequence,
    Regex,
    Date,
    Bruteforce,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryPattern {
    /// Lower-cased word that was looked up (the de-substituted spelling for
    /// leet matches, the token itself for fuzzy matches).
    pub matched_word: String,
    pub rank: usize,
    pub dictionary_name: String,
    pub reversed: bool,
    pub l33t: bool,
    /// Substitutions used by a leet match: substitute -> original letter.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sub: BTreeMap<char, char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levenshtein_distance: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levenshtein_distance_entry: Option<String>,
}

impl DictionaryPattern {
    pub(crate) fn exact(matched_word: String, rank: usize, dictionary_name: &str) -> Self {
        Self {
            matched_word,
            rank,
            dictionary_name: dictionary_name.to_string(),
            reversed: false,
            l33t: false,
            sub: BTreeMap::new(),
            levenshtein_distance: None,
            levenshtein_distance_entry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialPattern {
    pub graph: String,
    pub turns: usize,
    pub shifted_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatPattern {
    pub base_token: String,
    /// Guesses of the optimal decomposition of `base_token` alone.
    pub base_guesses: f64,
    pub repeat_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SequenceName {
    Lower,
    Upper,
    Digits,
    Unicode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencePattern {
    pub sequence_name: SequenceName,
    pub sequence_space: u32,
    pub ascending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegexName {
    RecentYear,
    Digits,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegexPattern {
    pub regex_name: RegexName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePattern {
    /// Empty when the digits are not separated.
    pub separator: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Capitalization and substitution counts that multiply a dictionary rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryVariations {
    pub base_guesses: f64,
    pub uppercase_variations: f64,
    pub l33t_variations: f64,
}

/// A [`Match`] with its estimated guess count. `guesses >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub candidate: Match,
    #[serde(flatten)]
    pub variations: Option<DictionaryVariations>,
    pub guesses: f64,
    pub guesses_log10: f64,
}

impl ScoredMatch {
    pub fn i(&self) -> usize {
        self.candidate.i
    }

    pub fn j(&self) -> usize {
        self.candidate.j
    }

    pub fn token(&self) -> &str {
        &self.candidate.token
    }

    pub fn pattern(&self) -> &MatchPattern {
        &self.candidate.pattern
    }

    pub fn kind(&self) -> PatternKind {
        self.candidate.kind()
    }

    /// The dictionary payload, if this is a dictionary match.
    pub fn dictionary(&self) -> Option<&DictionaryPattern> {
        match &self.candidate.pattern {
            MatchPattern::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}
