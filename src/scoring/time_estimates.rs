//! Crack time estimates and the 0-4 score.

use serde::Serialize;

use crate::translations::Translations;

/// Guesses per second for each attack scenario.
const ONLINE_THROTTLING_PER_SECOND: f64 = 100.0 / 3600.0;
const ONLINE_NO_THROTTLING_PER_SECOND: f64 = 10.0;
const OFFLINE_SLOW_HASHING_PER_SECOND: f64 = 1e4;
const OFFLINE_FAST_HASHING_PER_SECOND: f64 = 1e10;

/// Slack added to each score threshold.
const DELTA: f64 = 5.0;

const SECOND: f64 = 1.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const MONTH: f64 = DAY * 31.0;
const YEAR: f64 = MONTH * 12.0;
const CENTURY: f64 = YEAR * 100.0;

/// One value per attack scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrackTimes<T> {
    pub online_throttling_x_per_hour: T,
    pub online_no_throttling_x_per_second: T,
    pub offline_slow_hashing_x_per_second: T,
    pub offline_fast_hashing_x_per_second: T,
}

impl<T> CrackTimes<T> {
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> CrackTimes<U> {
        CrackTimes {
            online_throttling_x_per_hour: f(&self.online_throttling_x_per_hour),
            online_no_throttling_x_per_second: f(&self.online_no_throttling_x_per_second),
            offline_slow_hashing_x_per_second: f(&self.offline_slow_hashing_x_per_second),
            offline_fast_hashing_x_per_second: f(&self.offline_fast_hashing_x_per_second),
        }
    }
}

/// Seconds to exhaust `guesses` in each scenario.
pub fn crack_times_seconds(guesses: f64) -> CrackTimes<f64> {
    CrackTimes {
        online_throttling_x_per_hour: guesses / ONLINE_THROTTLING_PER_SECOND,
        online_no_throttling_x_per_second: guesses / ONLINE_NO_THROTTLING_PER_SECOND,
        offline_slow_hashing_x_per_second: guesses / OFFLINE_SLOW_HASHING_PER_SECOND,
        offline_fast_hashing_x_per_second: guesses / OFFLINE_FAST_HASHING_PER_SECOND,
    }
}

/// Translation key and rounded count for a duration.
///
/// `base` is `None` below one second and from one century on.
pub fn display_time(seconds: f64) -> (&'static str, Option<u64>) {
    const UNITS: [(f64, &str, &str); 7] = [
        (SECOND, "second", "seconds"),
        (MINUTE, "minute", "minutes"),
        (HOUR, "hour", "hours"),
        (DAY, "day", "days"),
        (MONTH, "month", "months"),
        (YEAR, "year", "years"),
        (CENTURY, "", ""),
    ];

    if seconds < SECOND {
        return ("ltSecond", None);
    }
    for pair in UNITS.windows(2) {
        let (unit, singular, plural) = pair[0];
        let (next, _, _) = pair[1];
        if seconds < next {
            let base = (seconds / unit).round() as u64;
            let key = if base == 1 { singular } else { plural };
            return (key, Some(base));
        }
    }
    ("centuries", None)
}

/// 0 (too guessable) to 4 (very unguessable).
pub fn guesses_to_score(guesses: f64) -> u8 {
    if guesses < 1e3 + DELTA {
        0
    } else if guesses < 1e6 + DELTA {
        1
    } else if guesses < 1e8 + DELTA {
        2
    } else if guesses < 1e10 + DELTA {
        3
    } else {
        4
    }
}

/// Crack times in every form the evaluation reports.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEstimates {
    pub seconds: CrackTimes<f64>,
    pub display: CrackTimes<String>,
    pub base: CrackTimes<Option<u64>>,
    pub score: u8,
}

pub fn estimate_attack_times(guesses: f64, translations: &Translations) -> TimeEstimates {
    let seconds = crack_times_seconds(guesses);
    let displayed = seconds.map(|&s| display_time(s));
    TimeEstimates {
        display: displayed.map(|&(key, base)| translations.time_estimation(key, base)),
        base: displayed.map(|&(_, base)| base),
        seconds,
        score: guesses_to_score(guesses),
    }
}
