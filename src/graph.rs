//! Keyboard adjacency graphs.
//!
//! A graph maps every key character to its neighbors in a fixed direction
//! order. Each neighbor is the key's full token (e.g. `"qQ"`: unshifted then
//! shifted character) or `None` for a missing neighbor on the layout edge.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

const QWERTY: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?
"#;

const DVORAK: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '" ,< .> pP yY fF gG cC rR lL /? =+ \|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ
"#;

const KEYPAD: &str = r#"
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
"#;

const MAC_KEYPAD: &str = r#"
  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 .
"#;

/// Adjacency of keys on one physical layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HashMap<char, Vec<Option<String>>>")]
pub struct AdjacencyGraph {
    neighbors: HashMap<char, Vec<Option<String>>>,
    /// Characters typed with shift (second character of a key token).
    shifted: HashSet<char>,
    average_degree: f64,
}

impl From<HashMap<char, Vec<Option<String>>>> for AdjacencyGraph {
    fn from(neighbors: HashMap<char, Vec<Option<String>>>) -> Self {
        Self::new(neighbors)
    }
}

impl AdjacencyGraph {
    pub fn new(neighbors: HashMap<char, Vec<Option<String>>>) -> Self {
        let shifted = neighbors
            .values()
            .flatten()
            .flatten()
            .filter_map(|token| token.chars().nth(1))
            .collect();
        let average_degree = if neighbors.is_empty() {
            0.0
        } else {
            let edges: usize = neighbors
                .values()
                .map(|adj| adj.iter().filter(|n| n.is_some()).count())
                .sum();
            edges as f64 / neighbors.len() as f64
        };
        Self {
            neighbors,
            shifted,
            average_degree,
        }
    }

    /// Builds a graph from a drawn layout.
    ///
    /// Every key is a whitespace separated token of equal width. A slanted
    /// layout (typewriter keyboards) indents each row by one more column and
    /// has six neighbors per key; an aligned layout (keypads) has eight.
    pub fn from_layout(layout: &str, slanted: bool) -> Self {
        let token_size = layout
            .split_whitespace()
            .next()
            .map_or(1, |t| t.chars().count());
        let x_unit = token_size as i64 + 1;

        let mut positions: BTreeMap<(i64, i64), &str> = BTreeMap::new();
        for (y, line) in layout.split('\n').enumerate() {
            let y = y as i64;
            let slant = if slanted { y - 1 } else { 0 };
            let mut search_from = 0;
            for token in line.split_whitespace() {
                let Some(offset) = line[search_from..].find(token) else {
                    continue;
                };
                let byte_index = search_from + offset;
                search_from = byte_index + token.len();
                let column = line[..byte_index].chars().count() as i64;
                positions.insert(((column - slant).div_euclid(x_unit), y), token);
            }
        }

        let mut neighbors = HashMap::new();
        for (&(x, y), token) in &positions {
            let adjacent: Vec<Option<String>> = adjacent_coords(x, y, slanted)
                .iter()
                .map(|coord| positions.get(coord).map(|t| t.to_string()))
                .collect();
            for c in token.chars() {
                neighbors.insert(c, adjacent.clone());
            }
        }
        Self::new(neighbors)
    }

    /// US qwerty keyboard.
    pub fn qwerty() -> Self {
        Self::from_layout(QWERTY, true)
    }

    /// US dvorak keyboard.
    pub fn dvorak() -> Self {
        Self::from_layout(DVORAK, true)
    }

    /// Numeric keypad.
    pub fn keypad() -> Self {
        Self::from_layout(KEYPAD, false)
    }

    /// Apple numeric keypad.
    pub fn mac_keypad() -> Self {
        Self::from_layout(MAC_KEYPAD, false)
    }

    /// The four built-in layouts keyed by their conventional names.
    pub fn defaults() -> BTreeMap<String, AdjacencyGraph> {
        BTreeMap::from([
            ("qwerty".to_string(), Self::qwerty()),
            ("dvorak".to_string(), Self::dvorak()),
            ("keypad".to_string(), Self::keypad()),
            ("macKeypad".to_string(), Self::mac_keypad()),
        ])
    }

    /// Neighbors of `c` in direction order, empty if `c` is not a key.
    pub fn neighbors(&self, c: char) -> &[Option<String>] {
        self.neighbors.get(&c).map_or(&[], Vec::as_slice)
    }

    pub fn is_shifted(&self, c: char) -> bool {
        self.shifted.contains(&c)
    }

    /// Number of characters on the layout.
    pub fn starting_positions(&self) -> usize {
        self.neighbors.len()
    }

    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

fn adjacent_coords(x: i64, y: i64, slanted: bool) -> Vec<(i64, i64)> {
    if slanted {
        vec![
            (x - 1, y),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        vec![
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qwerty_neighbors_of_g() {
        let g = AdjacencyGraph::qwerty();
        let adj: Vec<Option<&str>> = g.neighbors('g').iter().map(|n| n.as_deref()).collect();
        assert_eq!(
            adj,
            vec![Some("fF"), Some("tT"), Some("yY"), Some("hH"), Some("bB"), Some("vV")]
        );
    }

    #[test]
    fn test_qwerty_edge_keys_have_placeholders() {
        let g = AdjacencyGraph::qwerty();
        let adj = g.neighbors('`');
        assert_eq!(adj.len(), 6);
        assert_eq!(adj[0], None);
        assert_eq!(adj[3].as_deref(), Some("1!"));
        assert_eq!(adj[4].as_deref(), None);
    }

    #[test]
    fn test_qwerty_shared_token_chars() {
        let g = AdjacencyGraph::qwerty();
        assert_eq!(g.neighbors('q'), g.neighbors('Q'));
        assert!(g.is_shifted('Q'));
        assert!(g.is_shifted('!'));
        assert!(!g.is_shifted('q'));
        assert_eq!(g.starting_positions(), 94);
    }

    #[test]
    fn test_keypad_is_aligned() {
        let g = AdjacencyGraph::keypad();
        let adj: Vec<Option<&str>> = g.neighbors('5').iter().map(|n| n.as_deref()).collect();
        assert_eq!(
            adj,
            vec![Some("4"), Some("7"), Some("8"), Some("9"), Some("6"), Some("3"), Some("2"), Some("1")]
        );
        assert!(!g.is_shifted('*'));
        assert_eq!(g.starting_positions(), 15);
    }

    #[test]
    fn test_average_degree_counts_present_neighbors() {
        let g = AdjacencyGraph::new(HashMap::from([
            ('a', vec![Some("b".to_string()), None]),
            ('b', vec![Some("a".to_string()), Some("c".to_string())]),
        ]));
        assert!((g.average_degree() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_from_json_shape() {
        let g: AdjacencyGraph =
            serde_json::from_str(r#"{"a": ["bB", null], "b": [null, "aA"]}"#).unwrap();
        assert_eq!(g.neighbors('a')[0].as_deref(), Some("bB"));
        assert!(g.is_shifted('B'));
        assert!(g.neighbors('z').is_empty());
    }
}
