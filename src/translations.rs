//! Feedback and crack-time texts.
//!
//! Texts are plain data keyed by fixed identifiers; the estimator only picks
//! keys. [`Translations::validate`] runs at construction so a missing key
//! never surfaces during a check.

use std::collections::HashMap;

use serde::Deserialize;

use crate::options::ConfigError;

/// Warning keys the feedback step may select.
pub const WARNING_KEYS: &[&str] = &[
    "straightRow",
    "keyPattern",
    "simpleRepeat",
    "extendedRepeat",
    "sequences",
    "recentYears",
    "dates",
    "topTen",
    "topHundred",
    "common",
    "similarToCommon",
    "wordByItself",
    "namesByThemselves",
    "commonNames",
    "userInputs",
];

/// Suggestion keys the feedback step may select.
pub const SUGGESTION_KEYS: &[&str] = &[
    "l33t",
    "reverseWords",
    "allUppercase",
    "capitalization",
    "dates",
    "recentYears",
    "associatedYears",
    "sequences",
    "repeated",
    "longerKeyboardPattern",
    "anotherWord",
    "useWords",
    "noNeed",
];

/// Crack-time unit keys; `{base}` in a text is replaced by the count.
pub const TIME_ESTIMATION_KEYS: &[&str] = &[
    "ltSecond",
    "second",
    "seconds",
    "minute",
    "minutes",
    "hour",
    "hours",
    "day",
    "days",
    "month",
    "months",
    "year",
    "years",
    "centuries",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub warnings: HashMap<String, String>,
    pub suggestions: HashMap<String, String>,
    pub time_estimation: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

impl Translations {
    /// Parses translations from JSON with `warnings`, `suggestions` and
    /// `timeEstimation` objects, and checks every key is present.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let translations: Self = serde_json::from_str(json)?;
        translations.validate()?;
        Ok(translations)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sections = [
            ("warnings", &self.warnings, WARNING_KEYS),
            ("suggestions", &self.suggestions, SUGGESTION_KEYS),
            ("timeEstimation", &self.time_estimation, TIME_ESTIMATION_KEYS),
        ];
        for (section, texts, keys) in sections {
            if let Some(key) = keys.iter().find(|k| !texts.contains_key(**k)) {
                return Err(ConfigError::MissingTranslation {
                    section,
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn warning(&self, key: &str) -> String {
        self.warnings.get(key).cloned().unwrap_or_default()
    }

    pub(crate) fn suggestion(&self, key: &str) -> String {
        self.suggestions.get(key).cloned().unwrap_or_default()
    }

    pub(crate) fn time_estimation(&self, key: &str, base: Option<u64>) -> String {
        let text = self.time_estimation.get(key).map_or("", String::as_str);
        match base {
            Some(base) => text.replace("{base}", &base.to_string()),
            None => text.to_string(),
        }
    }

    pub fn english() -> Self {
        fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        Self {
            warnings: table(&[
                ("straightRow", "Straight rows of keys on your keyboard are easy to guess."),
                ("keyPattern", "Short keyboard patterns are easy to guess."),
                ("simpleRepeat", "Repeated characters like \"aaa\" are easy to guess."),
                (
                    "extendedRepeat",
                    "Repeated character patterns like \"abcabcabc\" are easy to guess.",
                ),
                ("sequences", "Common character sequences like \"abc\" are easy to guess."),
                ("recentYears", "Recent years are easy to guess."),
                ("dates", "Dates are easy to guess."),
                ("topTen", "This is a heavily used password."),
                ("topHundred", "This is a frequently used password."),
                ("common", "This is a commonly used password."),
                ("similarToCommon", "This is similar to a commonly used password."),
                ("wordByItself", "Single words are easy to guess."),
                ("namesByThemselves", "Single names or surnames are easy to guess."),
                ("commonNames", "Common names and surnames are easy to guess."),
                ("userInputs", "There should not be any personal or page related data."),
            ]),
            suggestions: table(&[
                ("l33t", "Avoid predictable letter substitutions like '@' for 'a'."),
                ("reverseWords", "Avoid reversed spellings of common words."),
                ("allUppercase", "Capitalize some, but not all letters."),
                ("capitalization", "Capitalize more than the first letter."),
                ("dates", "Avoid dates and years that are associated with you."),
                ("recentYears", "Avoid recent years."),
                ("associatedYears", "Avoid years that are associated with you."),
                ("sequences", "Avoid common character sequences."),
                ("repeated", "Avoid repeated words and characters."),
                (
                    "longerKeyboardPattern",
                    "Use longer keyboard patterns and change typing direction multiple times.",
                ),
                ("anotherWord", "Add more words that are less common."),
                ("useWords", "Use multiple words, but avoid common phrases."),
                (
                    "noNeed",
                    "You can create strong passwords without using symbols, numbers, or uppercase letters.",
                ),
            ]),
            time_estimation: table(&[
                ("ltSecond", "less than a second"),
                ("second", "{base} second"),
                ("seconds", "{base} seconds"),
                ("minute", "{base} minute"),
                ("minutes", "{base} minutes"),
                ("hour", "{base} hour"),
                ("hours", "{base} hours"),
                ("day", "{base} day"),
                ("days", "{base} days"),
                ("month", "{base} month"),
                ("months", "{base} months"),
                ("year", "{base} year"),
                ("years", "{base} years"),
                ("centuries", "centuries"),
            ]),
        }
    }
}
