//! Password guessability estimator - main evaluation logic.

use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::dictionary::RankedDictionary;
use crate::feedback::{Feedback, get_feedback};
use crate::matching::MatchContext;
use crate::options::{Config, ConfigError, EstimatorOptions};
use crate::scoring::most_guessable_match_sequence;
use crate::scoring::time_estimates::{CrackTimes, estimate_attack_times};
use crate::types::ScoredMatch;

/// Delay before an async check runs, so rapid keystrokes only cost one check.
#[cfg(feature = "async")]
const DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Result of one [`Estimator::check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordEvaluation {
    /// The analysed password (truncated to the configured maximum length).
    pub password: String,
    pub guesses: f64,
    pub guesses_log10: f64,
    /// 0 (too guessable) to 4 (very unguessable).
    pub score: u8,
    pub sequence: Vec<ScoredMatch>,
    pub crack_times_seconds: CrackTimes<f64>,
    pub crack_times_display: CrackTimes<String>,
    pub crack_times_base: CrackTimes<Option<u64>>,
    pub feedback: Feedback,
    /// Milliseconds spent in the check.
    pub calc_time: u64,
}

/// Estimates how many guesses an attacker needs for a password.
///
/// Built once from [`EstimatorOptions`]; checks only read the configuration,
/// so one estimator can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: Config,
}

impl Estimator {
    /// Validates `options` and builds the ranked dictionaries.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A dictionary is empty or uses the reserved `userInputs` name
    /// - A keyboard graph has no keys
    /// - The Levenshtein threshold or the maximum length is zero
    /// - A translation key is missing
    pub fn new(options: EstimatorOptions) -> Result<Self, ConfigError> {
        let config = options.build().inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::error!("Estimator configuration FAILED: {}", _e);
        })?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Estimator ready: {} dictionaries, {} graphs, levenshtein {}",
            config.dictionaries.len(),
            config.graphs.len(),
            if config.use_levenshtein_distance { "on" } else { "off" }
        );

        Ok(Self { config })
    }

    /// Evaluates `password`, treating `user_inputs` (name, email, site...)
    /// as a ranked dictionary of their own.
    ///
    /// Never fails: every password, including the empty one, gets a result.
    pub fn check(&self, password: &SecretString, user_inputs: &[&str]) -> PasswordEvaluation {
        let start = Instant::now();

        let pwd = password.expose_secret();
        let chars: Vec<char> = pwd.chars().take(self.config.max_length).collect();

        #[cfg(feature = "tracing")]
        {
            if chars.len() < pwd.chars().count() {
                tracing::warn!("Password truncated to {} characters", self.config.max_length);
            }
        }

        let user_inputs = RankedDictionary::from_ordered(user_inputs);
        let ctx = MatchContext::new(&self.config, &user_inputs);
        let matches = ctx.omnimatch(&chars);

        #[cfg(feature = "tracing")]
        tracing::debug!("{} candidate matches", matches.len());

        let result = most_guessable_match_sequence(&chars, matches, &self.config);
        let times = estimate_attack_times(result.guesses, &self.config.translations);
        let feedback = get_feedback(times.score, &result.sequence, &self.config.translations);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Evaluation done: log10 guesses {:.2}, score {}",
            result.guesses_log10,
            times.score
        );

        PasswordEvaluation {
            password: chars.into_iter().collect(),
            guesses: result.guesses,
            guesses_log10: result.guesses_log10,
            score: times.score,
            sequence: result.sequence,
            crack_times_seconds: times.seconds,
            crack_times_display: times.display,
            crack_times_base: times.base,
            feedback,
            calc_time: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Async version that debounces, then sends the evaluation via channel.
    ///
    /// Nothing is sent when `token` is cancelled before the debounce ends.
    #[cfg(feature = "async")]
    pub async fn check_tx(
        &self,
        password: &SecretString,
        user_inputs: &[&str],
        token: CancellationToken,
        tx: mpsc::Sender<PasswordEvaluation>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("evaluation is about to start...");

        tokio::select! {
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::info!("Evaluation cancelled");
                return;
            }
            _ = tokio::time::sleep(DEBOUNCE) => {}
        }

        let evaluation = self.check(password, user_inputs);

        if let Err(_e) = tx.send(evaluation).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password evaluation result: {}", _e);
        }
    }
}
