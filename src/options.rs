//! Estimator configuration.
//!
//! Options are plain data handed to [`crate::Estimator::new`], which
//! validates them once and keeps them read-only for every later check.

use std::collections::BTreeMap;

use chrono::Datelike;
use thiserror::Error;

use crate::dictionary::{DictionaryError, RankedDictionary, USER_INPUTS_DICTIONARY};
use crate::graph::AdjacencyGraph;
use crate::l33t::L33tTable;
use crate::matching::levenshtein::FuzzyIndex;
use crate::translations::Translations;

pub const DEFAULT_LEVENSHTEIN_THRESHOLD: usize = 2;
pub const DEFAULT_MAX_LENGTH: usize = 256;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Dictionary '{0}' has no words")]
    EmptyDictionary(String),
    #[error("Dictionary name '{0}' is reserved for user inputs")]
    ReservedDictionaryName(String),
    #[error("Adjacency graph '{0}' has no keys")]
    EmptyGraph(String),
    #[error("Levenshtein threshold must be positive, got {0}")]
    InvalidLevenshteinThreshold(usize),
    #[error("Maximum password length must be positive")]
    InvalidMaxLength,
    #[error("Missing translation '{key}' in '{section}'")]
    MissingTranslation { section: &'static str, key: String },
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything an [`crate::Estimator`] is built from.
#[derive(Debug, Clone)]
pub struct EstimatorOptions {
    /// Dictionary name -> words, most common first.
    pub dictionaries: BTreeMap<String, Vec<String>>,
    /// Graph name -> keyboard adjacency.
    pub graphs: BTreeMap<String, AdjacencyGraph>,
    pub translations: Translations,
    pub l33t_table: L33tTable,
    /// Enables fuzzy dictionary matching.
    pub use_levenshtein_distance: bool,
    pub levenshtein_threshold: usize,
    /// Longer passwords are truncated before analysis.
    pub max_length: usize,
    /// Year dates and recent years are measured against.
    pub reference_year: i32,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            dictionaries: BTreeMap::new(),
            graphs: AdjacencyGraph::defaults(),
            translations: Translations::english(),
            l33t_table: L33tTable::default(),
            use_levenshtein_distance: false,
            levenshtein_threshold: DEFAULT_LEVENSHTEIN_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            reference_year: chrono::Local::now().year(),
        }
    }
}

impl EstimatorOptions {
    /// Adds (or replaces) a dictionary.
    pub fn with_dictionary<I, S>(mut self, name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dictionaries
            .insert(name.to_string(), words.into_iter().map(Into::into).collect());
        self
    }

    /// Adds every word list found in `dir` (see [`crate::load_dictionaries`]).
    pub fn with_dictionary_dir<P: AsRef<std::path::Path>>(
        mut self,
        dir: P,
    ) -> Result<Self, ConfigError> {
        self.dictionaries.extend(crate::dictionary::load_dictionaries(dir)?);
        Ok(self)
    }

    pub fn with_levenshtein(mut self, threshold: usize) -> Self {
        self.use_levenshtein_distance = true;
        self.levenshtein_threshold = threshold;
        self
    }

    pub(crate) fn build(self) -> Result<Config, ConfigError> {
        if self.levenshtein_threshold == 0 {
            return Err(ConfigError::InvalidLevenshteinThreshold(0));
        }
        if self.max_length == 0 {
            return Err(ConfigError::InvalidMaxLength);
        }
        self.translations.validate()?;

        if let Some((name, _)) = self.graphs.iter().find(|(_, g)| g.is_empty()) {
            return Err(ConfigError::EmptyGraph(name.clone()));
        }

        let mut dictionaries = BTreeMap::new();
        for (name, words) in self.dictionaries {
            if name == USER_INPUTS_DICTIONARY {
                return Err(ConfigError::ReservedDictionaryName(name));
            }
            let ranked = RankedDictionary::from_ordered(&words);
            if ranked.is_empty() {
                return Err(ConfigError::EmptyDictionary(name));
            }
            dictionaries.insert(name, ranked);
        }

        let fuzzy = if self.use_levenshtein_distance {
            dictionaries
                .iter()
                .map(|(name, dict)| (name.clone(), FuzzyIndex::new(dict)))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(Config {
            dictionaries,
            fuzzy,
            graphs: self.graphs,
            translations: self.translations,
            l33t_table: self.l33t_table,
            use_levenshtein_distance: self.use_levenshtein_distance,
            levenshtein_threshold: self.levenshtein_threshold,
            max_length: self.max_length,
            reference_year: self.reference_year,
        })
    }
}

/// Validated, read-only configuration shared by all checks.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub dictionaries: BTreeMap<String, RankedDictionary>,
    /// Edit-distance index per dictionary, built only when fuzzy matching is on.
    pub fuzzy: BTreeMap<String, FuzzyIndex>,
    pub graphs: BTreeMap<String, AdjacencyGraph>,
    pub translations: Translations,
    pub l33t_table: L33tTable,
    pub use_levenshtein_distance: bool,
    pub levenshtein_threshold: usize,
    pub max_length: usize,
    pub reference_year: i32,
}
