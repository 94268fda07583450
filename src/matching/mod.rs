//! Password matchers
//!
//! Each matcher independently proposes explanations for substrings of the
//! password. Matchers are pure: they read the shared configuration and
//! return candidates, nothing else.

mod bruteforce;
mod date;
mod dictionary;
pub(crate) mod levenshtein;
mod regex;
mod repeat;
mod sequence;
mod spatial;

use crate::dictionary::{RankedDictionary, USER_INPUTS_DICTIONARY};
use crate::options::Config;
use crate::types::Match;

use levenshtein::FuzzyIndex;

/// Read-only inputs shared by the matchers during one check.
pub(crate) struct MatchContext<'a> {
    pub config: &'a Config,
    pub user_inputs: &'a RankedDictionary,
    /// Index over the user inputs, present when fuzzy matching is on.
    user_fuzzy: Option<FuzzyIndex>,
}

impl<'a> MatchContext<'a> {
    pub fn new(config: &'a Config, user_inputs: &'a RankedDictionary) -> Self {
        let user_fuzzy = (config.use_levenshtein_distance && !user_inputs.is_empty())
            .then(|| FuzzyIndex::new(user_inputs));
        Self {
            config,
            user_inputs,
            user_fuzzy,
        }
    }

    /// Configured dictionaries followed by the user inputs, if any.
    pub fn dictionaries(&self) -> impl Iterator<Item = (&'a str, &'a RankedDictionary)> {
        let user_inputs = self.user_inputs;
        self.config
            .dictionaries
            .iter()
            .map(|(name, dict)| (name.as_str(), dict))
            .chain((!user_inputs.is_empty()).then_some((USER_INPUTS_DICTIONARY, user_inputs)))
    }

    /// Dictionaries that have an edit-distance index, with that index.
    pub fn fuzzy_dictionaries(
        &self,
    ) -> impl Iterator<Item = (&str, &RankedDictionary, &FuzzyIndex)> + '_ {
        let configured = self.config.fuzzy.iter().filter_map(|(name, index)| {
            let dict = self.config.dictionaries.get(name)?;
            Some((name.as_str(), dict, index))
        });
        let user = self
            .user_fuzzy
            .as_ref()
            .map(|index| (USER_INPUTS_DICTIONARY, self.user_inputs, index));
        configured.chain(user)
    }

    /// Runs every matcher over `password`, then fills the uncovered gaps
    /// with bruteforce matches. Sorted by `(i, j)`.
    pub fn omnimatch(&self, password: &[char]) -> Vec<Match> {
        let mut matches: Vec<Match> = Matcher::ALL
            .iter()
            .flat_map(|matcher| matcher.find(password, self))
            .collect();
        matches.extend(bruteforce::fill_gaps(password, &matches));
        matches.sort_by_key(|m| (m.i, m.j));
        matches
    }
}

/// The structural matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Matcher {
    Dictionary,
    Spatial,
    Repeat,
    Sequence,
    Regex,
    Date,
}

impl Matcher {
    pub const ALL: [Matcher; 6] = [
        Matcher::Dictionary,
        Matcher::Spatial,
        Matcher::Repeat,
        Matcher::Sequence,
        Matcher::Regex,
        Matcher::Date,
    ];

    pub fn find(self, password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
        let matches = match self {
            Matcher::Dictionary => dictionary::find(password, ctx),
            Matcher::Spatial => spatial::find(password, &ctx.config.graphs),
            Matcher::Repeat => repeat::find(password, ctx),
            Matcher::Sequence => sequence::find(password),
            Matcher::Regex => regex::find(password),
            Matcher::Date => date::find(password),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!("{:?} matcher produced {} candidates", self, matches.len());

        matches
    }
}

/// Single-character lower-casing; characters whose lower case expands to
/// several characters are kept as they are so indices stay aligned.
pub(crate) fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
