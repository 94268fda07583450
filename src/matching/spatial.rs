//! Spatial matcher - runs of neighboring keys on a keyboard layout.

use std::collections::BTreeMap;

use crate::graph::AdjacencyGraph;
use crate::types::{Match, MatchPattern, SpatialPattern};

/// Shortest run reported as a keyboard pattern.
const MIN_SPATIAL_LENGTH: usize = 3;

pub fn find(password: &[char], graphs: &BTreeMap<String, AdjacencyGraph>) -> Vec<Match> {
    graphs
        .iter()
        .flat_map(|(name, graph)| find_in_graph(password, graph, name))
        .collect()
}

fn find_in_graph(password: &[char], graph: &AdjacencyGraph, name: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let n = password.len();
    let mut i = 0;

    while i + 1 < n {
        let mut j = i + 1;
        let mut last_direction: Option<usize> = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(graph.is_shifted(password[i]));

        loop {
            let found = (j < n)
                .then(|| step(graph, password[j - 1], password[j]))
                .flatten();

            match found {
                Some((direction, shifted)) => {
                    if shifted {
                        shifted_count += 1;
                    }
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    j += 1;
                }
                None => {
                    if j - i >= MIN_SPATIAL_LENGTH {
                        let pattern = SpatialPattern {
                            graph: name.to_string(),
                            turns,
                            shifted_count,
                        };
                        let pattern = MatchPattern::Spatial(pattern);
                        matches.push(Match::new(password, i, j - 1, pattern));
                    }
                    i = j;
                    break;
                }
            }
        }
    }
    matches
}

/// Direction index of `next` among the neighbors of `prev`, and whether it
/// is the shifted character of that key.
fn step(graph: &AdjacencyGraph, prev: char, next: char) -> Option<(usize, bool)> {
    graph
        .neighbors(prev)
        .iter()
        .enumerate()
        .find_map(|(direction, key)| {
            let position = key.as_deref()?.chars().position(|c| c == next)?;
            Some((direction, position == 1))
        })
}
