//! Bruteforce fallback - wraps every uncovered stretch of the password.

use crate::types::{Match, MatchPattern};

/// One bruteforce match per maximal run of positions no match covers.
pub fn fill_gaps(password: &[char], matches: &[Match]) -> Vec<Match> {
    let mut covered = vec![false; password.len()];
    for m in matches {
        covered[m.i..=m.j].fill(true);
    }

    let mut gaps = Vec::new();
    let mut start = None;
    for (k, &is_covered) in covered.iter().enumerate() {
        match (start, is_covered) {
            (None, false) => start = Some(k),
            (Some(i), true) => {
                gaps.push(Match::new(password, i, k - 1, MatchPattern::Bruteforce));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(i) = start {
        gaps.push(Match::new(password, i, password.len() - 1, MatchPattern::Bruteforce));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_everything_uncovered() {
        let pwd = chars("x9#");
        let gaps = fill_gaps(&pwd, &[]);
        assert_eq!(gaps.len(), 1);
        assert_eq!((gaps[0].i, gaps[0].j), (0, 2));
        assert_eq!(gaps[0].token, "x9#");
    }

    #[test]
    fn test_gaps_between_matches() {
        let pwd = chars("ab123cd");
        let matches = vec![Match::new(&pwd, 2, 4, MatchPattern::Bruteforce)];
        let spans: Vec<(usize, usize)> =
            fill_gaps(&pwd, &matches).iter().map(|m| (m.i, m.j)).collect();
        assert_eq!(spans, vec![(0, 1), (5, 6)]);
    }

    #[test]
    fn test_fully_covered() {
        let pwd = chars("abc");
        let matches = vec![Match::new(&pwd, 0, 2, MatchPattern::Bruteforce)];
        assert!(fill_gaps(&pwd, &matches).is_empty());
        assert!(fill_gaps(&[], &[]).is_empty());
    }
}
