//! Distance-bounded dictionary lookups backed by a Levenshtein transducer.

use liblevenshtein::dictionary::double_array_trie_char::DoubleArrayTrieChar;
use liblevenshtein::prelude::{Algorithm, Transducer};

use crate::dictionary::{RankedDictionary, RankedWord};

/// Char-level trie over one dictionary's words, queried by edit distance.
#[derive(Debug, Clone)]
pub(crate) struct FuzzyIndex {
    transducer: Transducer<DoubleArrayTrieChar>,
}

impl FuzzyIndex {
    pub fn new(dict: &RankedDictionary) -> Self {
        let trie = DoubleArrayTrieChar::from_terms(dict.entries().iter().map(|e| e.word.as_str()));
        Self {
            transducer: Transducer::new(trie, Algorithm::Standard),
        }
    }

    /// Closest word at a distance in `(0, threshold]` from `token`, lowest
    /// rank on ties. `dict` must be the dictionary the index was built from.
    pub fn closest<'d>(
        &self,
        token: &str,
        dict: &'d RankedDictionary,
        threshold: usize,
    ) -> Option<(usize, &'d RankedWord)> {
        self.transducer
            .query_with_distance(token, threshold)
            .filter(|candidate| candidate.distance > 0)
            .filter_map(|candidate| Some((candidate.distance, dict.entry(&candidate.term)?)))
            .min_by_key(|(distance, entry)| (*distance, entry.rank))
    }
}
