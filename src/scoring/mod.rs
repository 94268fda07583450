//! Guess estimation and sequence assembly
//!
//! Given every candidate match of a password, finds the decomposition of the
//! whole password into non-overlapping matches with the fewest total guesses.
//!
//! A sequence of `l` matches with guess product `π` costs
//! `l! · π + 10000^(l − 1)`: the factorial accounts for the attacker not
//! knowing the order of the patterns, the additive term penalizes long
//! chains of tiny matches.

pub mod estimate;
pub mod time_estimates;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::options::Config;
use crate::types::{Match, MatchPattern, PatternKind, ScoredMatch};
use estimate::{estimate_guesses, saturate};

/// Per-extra-match penalty of the sequence cost.
const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;

/// The cheapest decomposition of a password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSequence {
    pub guesses: f64,
    pub guesses_log10: f64,
    pub sequence: Vec<ScoredMatch>,
}

/// Best known sequence ending at some index with some length.
#[derive(Debug, Clone, Copy)]
struct Step {
    /// Last match of the sequence, in the scorer's arena.
    last: usize,
    product: f64,
    product_log10: f64,
    total: f64,
    total_log10: f64,
}

struct Optimizer<'a> {
    password: &'a [char],
    config: &'a Config,
    arena: Vec<ScoredMatch>,
    /// `steps[k][l]`: cheapest sequence of `l` matches covering `0..=k`.
    steps: Vec<BTreeMap<usize, Step>>,
}

/// Picks the lowest-guess sequence of `matches` covering all of `password`.
///
/// Bruteforce matches are synthesized for any `[i, k]` as needed, so the
/// result always covers every position. An empty password yields an empty
/// sequence and one guess.
pub(crate) fn most_guessable_match_sequence(
    password: &[char],
    matches: Vec<Match>,
    config: &Config,
) -> MatchSequence {
    let n = password.len();
    if n == 0 {
        return MatchSequence {
            guesses: 1.0,
            guesses_log10: 0.0,
            sequence: Vec::new(),
        };
    }

    let mut optimizer = Optimizer {
        password,
        config,
        arena: Vec::with_capacity(matches.len()),
        steps: vec![BTreeMap::new(); n],
    };

    let mut by_end: Vec<Vec<usize>> = vec![Vec::new(); n];
    for m in matches {
        if m.j >= n || m.i > m.j {
            continue;
        }
        let end = m.j;
        by_end[end].push(optimizer.score(m));
    }
    for ending in &mut by_end {
        ending.sort_by_key(|&index| optimizer.arena[index].i());
    }

    for (k, ending) in by_end.iter().enumerate() {
        for &index in ending {
            let i = optimizer.arena[index].i();
            if i == 0 {
                optimizer.update(index, 1);
            } else {
                let lengths: Vec<usize> = optimizer.steps[i - 1].keys().copied().collect();
                for l in lengths {
                    optimizer.update(index, l + 1);
                }
            }
        }
        optimizer.bruteforce_update(k);
    }

    optimizer.unwind()
}

impl Optimizer<'_> {
    fn score(&mut self, candidate: Match) -> usize {
        self.arena.push(estimate_guesses(candidate, self.password.len(), self.config));
        self.arena.len() - 1
    }

    /// Considers the arena match `index` as the `l`-th match of a sequence.
    fn update(&mut self, index: usize, l: usize) {
        let m = &self.arena[index];
        let (i, k) = (m.i(), m.j());
        let mut product = m.guesses;
        let mut product_log10 = m.guesses_log10;
        if l > 1 {
            let Some(prev) = self.steps[i - 1].get(&(l - 1)) else {
                return;
            };
            product = saturate(product * prev.product);
            product_log10 += prev.product_log10;
        }

        let additive_log10 = (l - 1) as f64 * MIN_GUESSES_BEFORE_GROWING_SEQUENCE.log10();
        let total_log10 = log10_add(log10_factorial(l) + product_log10, additive_log10);
        let total = saturate(
            factorial(l) * product + MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi(l as i32 - 1),
        );

        // a sequence at least as short and at least as cheap already exists
        if self.steps[k]
            .range(..=l)
            .any(|(_, competing)| competing.total_log10 <= total_log10)
        {
            return;
        }

        self.steps[k].insert(
            l,
            Step {
                last: index,
                product,
                product_log10,
                total,
                total_log10,
            },
        );
    }

    /// Tries a bruteforce match over every `[i, k]`.
    fn bruteforce_update(&mut self, k: usize) {
        let whole = self.bruteforce(0, k);
        self.update(whole, 1);

        for i in 1..=k {
            let candidate = self.bruteforce(i, k);
            // two bruteforce matches in a row are one bruteforce match
            let lengths: Vec<usize> = self.steps[i - 1]
                .iter()
                .filter(|(_, step)| self.arena[step.last].kind() != PatternKind::Bruteforce)
                .map(|(&l, _)| l)
                .collect();
            for l in lengths {
                self.update(candidate, l + 1);
            }
        }
    }

    fn bruteforce(&mut self, i: usize, j: usize) -> usize {
        self.score(Match::new(self.password, i, j, MatchPattern::Bruteforce))
    }

    fn unwind(self) -> MatchSequence {
        let n = self.password.len();
        let mut best: Option<(usize, Step)> = None;
        for (&l, &step) in &self.steps[n - 1] {
            if best.is_none_or(|(_, b)| step.total_log10 < b.total_log10) {
                best = Some((l, step));
            }
        }
        let Some((mut l, final_step)) = best else {
            return MatchSequence {
                guesses: 1.0,
                guesses_log10: 0.0,
                sequence: Vec::new(),
            };
        };

        let mut indices = Vec::with_capacity(l);
        let mut k = n - 1;
        while let Some(step) = self.steps[k].get(&l) {
            indices.push(step.last);
            let i = self.arena[step.last].i();
            if i == 0 || l == 1 {
                break;
            }
            k = i - 1;
            l -= 1;
        }
        indices.reverse();

        let sequence = indices.iter().map(|&index| self.arena[index].clone()).collect();

        MatchSequence {
            guesses: final_step.total,
            guesses_log10: final_step.total_log10,
            sequence,
        }
    }
}

fn factorial(n: usize) -> f64 {
    saturate((2..=n).map(|k| k as f64).product())
}

fn log10_factorial(n: usize) -> f64 {
    (2..=n).map(|k| (k as f64).log10()).sum()
}

/// `log10(10^a + 10^b)` without leaving log space.
fn log10_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (1.0 + 10f64.powf(lo - hi)).log10()
}
