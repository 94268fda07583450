//! Ranked dictionary management
//!
//! Handles building ranked word lists and loading them from external files.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-call dictionary built from user-supplied context tokens.
pub const USER_INPUTS_DICTIONARY: &str = "userInputs";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty: {0}")]
    EmptyFile(PathBuf),
}

/// A dictionary word with its rank and length in code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    pub word: String,
    pub rank: usize,
    pub len: usize,
}

/// A word list where each word's rank is its 1-based position.
///
/// Lookups are case-insensitive: words are stored lower-cased and callers
/// look up lower-cased tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedDictionary {
    /// Word -> position in `entries`.
    index: HashMap<String, usize>,
    /// Words in rank order.
    entries: Vec<RankedWord>,
    /// Longest word, in code points.
    max_word_len: usize,
}

impl RankedDictionary {
    /// Builds a dictionary from words ordered from most to least common.
    ///
    /// Words are trimmed and lower-cased; blank words are skipped; a repeated
    /// word keeps the rank of its first occurrence.
    pub fn from_ordered<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        let mut rank = 0;
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            rank += 1;
            if dict.index.contains_key(&word) {
                continue;
            }
            let len = word.chars().count();
            dict.max_word_len = dict.max_word_len.max(len);
            dict.index.insert(word.clone(), dict.entries.len());
            dict.entries.push(RankedWord { word, rank, len });
        }
        dict
    }

    /// Rank of an already lower-cased word.
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.entry(word).map(|entry| entry.rank)
    }

    pub fn entry(&self, word: &str) -> Option<&RankedWord> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// Words with their ranks, most common first.
    pub fn entries(&self) -> &[RankedWord] {
        &self.entries
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the directory dictionaries are loaded from.
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_DIR`
/// 2. Default path `./assets/dictionaries`
pub fn dictionary_dir() -> PathBuf {
    std::env::var("PWD_DICTIONARY_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/dictionaries"))
}

/// Reads a newline separated word list, most common word first.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File has no words
pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DictionaryError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary loading FAILED: FileNotFound {:?}", path);
        return Err(DictionaryError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    let words: Vec<String> = content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    if words.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary loading FAILED: Empty file {:?}", path);
        return Err(DictionaryError::EmptyFile(path.to_path_buf()));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Dictionary loaded: {} words from {:?}", words.len(), path);

    Ok(words)
}

/// Loads every `*.txt` file in `dir` as a dictionary named after its file stem.
///
/// # Example
///
/// ```rust,ignore
/// // assets/dictionaries/passwords.txt -> "passwords"
/// let dictionaries = pwd_guessability::load_dictionaries(pwd_guessability::dictionary_dir())?;
/// ```
pub fn load_dictionaries<P: AsRef<Path>>(
    dir: P,
) -> Result<BTreeMap<String, Vec<String>>, DictionaryError> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        #[cfg(feature = "tracing")]
        tracing::error!("Dictionary loading FAILED: directory not found {:?}", dir);
        return Err(DictionaryError::FileNotFound(dir.to_path_buf()));
    }

    let mut dictionaries = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let words = load_word_list(&path)?;
        dictionaries.insert(name.to_string(), words);
    }
    Ok(dictionaries)
}
