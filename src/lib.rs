//! Password guessability estimation library
//!
//! Estimates how many guesses an attacker needs to find a password by
//! explaining it with the patterns people actually use: dictionary words
//! (also reversed, leet-spelled or misspelled), keyboard walks, repeats,
//! sequences, dates and years. The cheapest combination of patterns covering
//! the whole password gives the guess count, crack time estimates, a 0-4
//! score and feedback.
//!
//! # Features
//!
//! - `async` (default): Enables debounced async checks with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_DIR`: Directory of `*.txt` word lists loaded by
//!   [`dictionary_dir`] (default: `./assets/dictionaries`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_guessability::{Estimator, EstimatorOptions, dictionary_dir};
//! use secrecy::SecretString;
//!
//! // Build the estimator once at startup
//! let options = EstimatorOptions::default()
//!     .with_dictionary_dir(dictionary_dir())
//!     .expect("Failed to load dictionaries")
//!     .with_levenshtein(2);
//! let estimator = Estimator::new(options).expect("Invalid options");
//!
//! // Check a password against the user's own data as well
//! let password = SecretString::new("Tr0ub4dor&3".to_string().into());
//! let evaluation = estimator.check(&password, &["alice", "alice@example.com"]);
//!
//! println!("Score: {}", evaluation.score);
//! println!("Guesses: 10^{:.1}", evaluation.guesses_log10);
//! println!("Warning: {:?}", evaluation.feedback.warning);
//! ```

// Internal modules
mod dictionary;
mod evaluator;
mod feedback;
mod graph;
mod l33t;
mod matching;
mod options;
mod scoring;
mod translations;
mod types;

// Public API
pub use dictionary::{
    DictionaryError, RankedDictionary, RankedWord, USER_INPUTS_DICTIONARY, dictionary_dir,
    load_dictionaries, load_word_list,
};
pub use evaluator::{Estimator, PasswordEvaluation};
pub use feedback::Feedback;
pub use graph::AdjacencyGraph;
pub use l33t::L33tTable;
pub use options::{
    ConfigError, DEFAULT_LEVENSHTEIN_THRESHOLD, DEFAULT_MAX_LENGTH, EstimatorOptions,
};
pub use scoring::time_estimates::{CrackTimes, display_time, guesses_to_score};
pub use translations::Translations;
pub use types::{
    DatePattern, DictionaryPattern, DictionaryVariations, Match, MatchPattern, PatternKind,
    RegexName, RegexPattern, RepeatPattern, ScoredMatch, SequenceName, SequencePattern,
    SpatialPattern,
};
