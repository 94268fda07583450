//! Leet-speak normalization.
//!
//! Expands a token into the de-substituted spellings an attacker's
//! dictionary would contain (`p4ssw0rd` -> `password`).

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::matching::fold_case;

/// Upper bound on the spellings produced for a single token.
pub const MAX_L33T_VARIANTS: usize = 100;

/// Substitute character -> letters it can stand for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<char, Vec<char>>")]
pub struct L33tTable {
    originals: BTreeMap<char, Vec<char>>,
}

impl From<BTreeMap<char, Vec<char>>> for L33tTable {
    /// Builds the table from `letter -> substitutes`, the way leet tables
    /// are usually written down.
    fn from(by_letter: BTreeMap<char, Vec<char>>) -> Self {
        let mut originals: BTreeMap<char, Vec<char>> = BTreeMap::new();
        for (letter, subs) in by_letter {
            for sub in subs {
                let entry = originals.entry(sub).or_default();
                if !entry.contains(&letter) {
                    entry.push(letter);
                }
            }
        }
        for letters in originals.values_mut() {
            letters.sort_unstable();
        }
        Self { originals }
    }
}

impl Default for L33tTable {
    fn default() -> Self {
        let by_letter: [(char, &[char]); 12] = [
            ('a', &['4', '@']),
            ('b', &['8']),
            ('c', &['(', '{', '[', '<']),
            ('e', &['3']),
            ('g', &['6', '9']),
            ('i', &['1', '!', '|']),
            ('l', &['1', '|', '7']),
            ('o', &['0']),
            ('s', &['$', '5']),
            ('t', &['+', '7']),
            ('x', &['%']),
            ('z', &['2']),
        ];
        by_letter
            .into_iter()
            .map(|(letter, subs)| (letter, subs.to_vec()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

impl L33tTable {
    /// Letters `c` may stand for; empty if `c` is not a substitute.
    pub fn originals(&self, c: char) -> &[char] {
        self.originals.get(&c).map_or(&[], Vec::as_slice)
    }
}

/// One de-substituted spelling of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L33tVariant {
    /// Lower-cased characters, position-aligned with the input token.
    pub chars: Vec<char>,
    /// Substitute -> letter, for every substitute replaced in this variant.
    pub subs: BTreeMap<char, char>,
}

/// Expands `token` into its leet spellings.
///
/// Each substitute character present in the token is either kept or
/// replaced, at every occurrence, by one of the letters it stands for.
/// The unchanged token is not returned. At most `limit` variants are
/// produced, in a stable order.
pub fn l33t_variants(token: &[char], table: &L33tTable, limit: usize) -> Vec<L33tVariant> {
    let lowered: Vec<char> = token.iter().copied().map(fold_case).collect();

    let relevant: BTreeSet<char> = lowered
        .iter()
        .copied()
        .filter(|&c| !table.originals(c).is_empty())
        .collect();
    if relevant.is_empty() {
        return Vec::new();
    }

    let mut choices: Vec<BTreeMap<char, char>> = vec![BTreeMap::new()];
    for sub in relevant {
        let mut next = Vec::with_capacity(choices.len() * 2);
        for choice in &choices {
            next.push(choice.clone());
            for &letter in table.originals(sub) {
                let mut extended = choice.clone();
                extended.insert(sub, letter);
                next.push(extended);
            }
            if next.len() > limit {
                break;
            }
        }
        next.truncate(limit + 1);
        choices = next;
    }

    choices
        .into_iter()
        .filter(|subs| !subs.is_empty())
        .take(limit)
        .map(|subs| L33tVariant {
            chars: lowered
                .iter()
                .map(|c| subs.get(c).copied().unwrap_or(*c))
                .collect(),
            subs,
        })
        .collect()
}
