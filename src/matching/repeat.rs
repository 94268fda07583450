//! Repeat matcher - a base unit repeated back to back (`aaaa`, `abcabcabc`).

use super::MatchContext;
use crate::scoring;
use crate::types::{Match, MatchPattern, RepeatPattern};

/// Fewest copies of the base unit that count as a repeat.
const MIN_REPEAT_COUNT: usize = 3;

pub fn find(password: &[char], ctx: &MatchContext<'_>) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut last_index = 0;

    while let Some(run) = next_run(password, last_index) {
        let base = &password[run.start..run.start + run.period];
        let base_matches = ctx.omnimatch(base);
        let base_guesses =
            scoring::most_guessable_match_sequence(base, base_matches, ctx.config).guesses;

        let j = run.start + run.len - 1;
        let pattern = RepeatPattern {
            base_token: base.iter().collect(),
            base_guesses,
            repeat_count: run.len / run.period,
        };
        matches.push(Match::new(password, run.start, j, MatchPattern::Repeat(pattern)));
        last_index = j + 1;
    }
    matches
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    /// Length of the base unit.
    period: usize,
    len: usize,
}

/// Leftmost repeat starting at or after `from`.
///
/// Among the periods that repeat at that start, the longest run wins; the
/// reported period is the smallest one that tiles the run.
fn next_run(password: &[char], from: usize) -> Option<Run> {
    (from..password.len()).find_map(|start| {
        let runs: Vec<Run> = (1..=(password.len() - start) / MIN_REPEAT_COUNT)
            .filter_map(|period| {
                let copies = copies_at(password, start, period);
                (copies >= MIN_REPEAT_COUNT).then_some(Run {
                    start,
                    period,
                    len: copies * period,
                })
            })
            .collect();

        let lazy = *runs.first()?;
        let greedy = *runs.last()?;
        if greedy.len > lazy.len {
            let span = &password[start..start + greedy.len];
            Some(Run {
                period: smallest_period(span),
                ..greedy
            })
        } else {
            Some(lazy)
        }
    })
}

/// Number of back-to-back copies of `password[start..start + period]`.
fn copies_at(password: &[char], start: usize, period: usize) -> usize {
    let base = &password[start..start + period];
    password[start..]
        .chunks_exact(period)
        .take_while(|chunk| *chunk == base)
        .count()
}

fn smallest_period(span: &[char]) -> usize {
    (1..=span.len() / 2)
        .filter(|p| span.len() % p == 0)
        .find(|&p| span.chunks_exact(p).all(|chunk| chunk == &span[..p]))
        .unwrap_or(span.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::RankedDictionary;
    use crate::options::EstimatorOptions;

    fn repeats(password: &str) -> Vec<(String, RepeatPattern)> {
        let config = EstimatorOptions::default()
            .with_dictionary("passwords", ["batman"])
            .build()
            .unwrap();
        let user = RankedDictionary::default();
        let ctx = MatchContext::new(&config, &user);
        let chars: Vec<char> = password.chars().collect();
        find(&chars, &ctx)
            .into_iter()
            .map(|m| match m.pattern {
                MatchPattern::Repeat(p) => (m.token, p),
                other => panic!("Expected repeat match, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_two_copies_are_not_a_repeat() {
        assert!(repeats("").is_empty());
        assert!(repeats("aa").is_empty());
        assert!(repeats("abab").is_empty());
    }

    #[test]
    fn test_single_character_run() {
        let found = repeats("&&&&&");
        assert_eq!(found.len(), 1);
        let (token, p) = &found[0];
        assert_eq!(token, "&&&&&");
        assert_eq!(p.base_token, "&");
        assert_eq!(p.repeat_count, 5);
    }

    #[test]
    fn test_multi_character_base() {
        let found = repeats("abcabcabc");
        assert_eq!(found[0].1.base_token, "abc");
        assert_eq!(found[0].1.repeat_count, 3);
    }

    #[test]
    fn test_longest_run_uses_smallest_period() {
        // the shortest period only covers "aaa"
        let found = repeats("aaabaaabaaab");
        let (token, p) = &found[0];
        assert_eq!(token, "aaabaaabaaab");
        assert_eq!(p.base_token, "aaab");
        assert_eq!(p.repeat_count, 3);
    }

    #[test]
    fn test_runs_are_left_to_right_and_disjoint() {
        let found = repeats("xyz777zzz!!!q");
        let tokens: Vec<&str> = found.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tokens, vec!["777", "zzz", "!!!"]);
    }

    #[test]
    fn test_base_guesses_come_from_base_analysis() {
        let found = repeats("batmanbatmanbatman");
        let (_, p) = &found[0];
        assert_eq!(p.base_token, "batman");
        // rank 1 dictionary word alone: 1 + 1 additive
        assert!((p.base_guesses - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_smallest_period() {
        let chars: Vec<char> = "abababab".chars().collect();
        assert_eq!(smallest_period(&chars), 2);
        let chars: Vec<char> = "abc".chars().collect();
        assert_eq!(smallest_period(&chars), 3);
    }
}
