use pwd_guessability::{
    Estimator, EstimatorOptions, PasswordEvaluation, PatternKind, USER_INPUTS_DICTIONARY,
    guesses_to_score,
};
use secrecy::SecretString;
use std::time::{Duration, Instant};

fn secret(pwd: &str) -> SecretString {
    SecretString::new(pwd.to_string().into())
}

/// `passwords` with "password" at rank 1 and "elephant" at rank 344.
fn options() -> EstimatorOptions {
    let mut words: Vec<String> = (1..343).map(|n| format!("filler{:04}", n)).collect();
    words.insert(0, "password".to_string());
    words.push("elephant".to_string());
    EstimatorOptions::default()
        .with_dictionary("passwords", words)
        .with_dictionary("english_wikipedia", ["correct", "horse", "battery", "staple"])
        .with_dictionary("male_firstnames", ["john", "robert"])
}

fn assert_covers(evaluation: &PasswordEvaluation) {
    let mut next = 0;
    for m in &evaluation.sequence {
        assert_eq!(m.i(), next, "gap or overlap in {:?}", evaluation.password);
        assert!(m.j() >= m.i());
        assert_eq!(m.token().chars().count(), m.j() - m.i() + 1);
        next = m.j() + 1;
    }
    assert_eq!(next, evaluation.password.chars().count());
}

#[test]
fn test_misspelled_common_word() {
    let estimator = Estimator::new(options().with_levenshtein(2)).unwrap();
    let evaluation = estimator.check(&secret("alaphant"), &[]);

    assert_eq!(evaluation.sequence.len(), 1);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert_eq!(d.dictionary_name, "passwords");
    assert_eq!(d.levenshtein_distance, Some(2));
    assert_eq!(d.levenshtein_distance_entry.as_deref(), Some("elephant"));
    assert_eq!(evaluation.sequence[0].guesses, 344.0);
    assert_eq!(evaluation.guesses, 345.0);
    assert_eq!(evaluation.score, 0);

    let display = &evaluation.crack_times_display;
    assert_eq!(display.online_no_throttling_x_per_second, "35 seconds");
    assert_eq!(display.online_throttling_x_per_hour, "3 hours");
    assert_eq!(
        evaluation.feedback.warning.as_deref(),
        Some("This is a commonly used password.")
    );
}

#[test]
fn test_misspelled_user_input() {
    let estimator = Estimator::new(options().with_levenshtein(2)).unwrap();
    let evaluation =
        estimator.check(&secret("ishduehlduod83h4mfs8"), &["ishduehgldueod83h4mfis8"]);

    assert_eq!(evaluation.sequence.len(), 1);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert_eq!(d.dictionary_name, USER_INPUTS_DICTIONARY);
    assert_eq!(d.rank, 1);
    assert_eq!(d.levenshtein_distance, Some(3));
    assert_eq!(evaluation.guesses, 2.0);
    assert_eq!(evaluation.crack_times_display.online_throttling_x_per_hour, "1 minute");
    assert_eq!(
        evaluation.feedback.warning.as_deref(),
        Some("There should not be any personal or page related data.")
    );
}

#[test]
fn test_threshold_controls_fuzzy_reach() {
    let strict = Estimator::new(options().with_levenshtein(1)).unwrap();
    let evaluation = strict.check(&secret("eeleephaant"), &[]);
    assert!(
        evaluation
            .sequence
            .iter()
            .all(|m| m.dictionary().is_none_or(|d| d.levenshtein_distance.is_none()))
    );
    assert!(evaluation.guesses > 345.0);
    assert_covers(&evaluation);

    let loose = Estimator::new(options().with_levenshtein(3)).unwrap();
    let evaluation = loose.check(&secret("eeleephaant"), &[]);
    assert_eq!(evaluation.sequence.len(), 1);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert_eq!(d.levenshtein_distance, Some(3));
    assert_eq!(d.levenshtein_distance_entry.as_deref(), Some("elephant"));
    assert_eq!(evaluation.guesses, 345.0);
}

#[test]
fn test_exact_match_has_no_fuzzy_fields() {
    let estimator = Estimator::new(options().with_levenshtein(2)).unwrap();
    let evaluation = estimator.check(&secret("elephant"), &[]);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert_eq!(d.levenshtein_distance, None);
    assert_eq!(d.levenshtein_distance_entry, None);

    let json = serde_json::to_value(&evaluation).unwrap();
    assert!(json["sequence"][0].get("levenshteinDistance").is_none());
}

#[test]
fn test_sequence_covers_password() {
    let estimator = Estimator::new(options().with_levenshtein(2)).unwrap();
    let samples = [
        "correcthorsebatterystaple",
        "P@ssw0rd!",
        "john1987",
        "abcdefg123456",
        "qwertyuiop",
        "zxcvbnm,./",
        "11/09/2001",
        "AaAaAaAa",
        "drowssap",
        "X9$kq!Lm2#vR",
        "пароль2019",
        "日本語のパスワード",
        "tab\tand\u{7}bell",
        "😀😀😀😀",
    ];
    for pwd in samples {
        let evaluation = estimator.check(&secret(pwd), &["john", "doe"]);
        assert_covers(&evaluation);
        assert!(evaluation.guesses >= 1.0);
        assert!(evaluation.guesses_log10.is_finite());
        assert!(evaluation.score <= 4);
    }
}

#[test]
fn test_checks_are_repeatable() {
    let estimator = Estimator::new(options().with_levenshtein(2)).unwrap();
    let strip_time = |evaluation: &PasswordEvaluation| {
        let mut json = serde_json::to_value(evaluation).unwrap();
        json.as_object_mut().unwrap().remove("calcTime");
        json
    };

    for pwd in ["Tr0ub4dor&3", "alaphant", "2019john!!"] {
        let first = estimator.check(&secret(pwd), &["john"]);
        let second = estimator.check(&secret(pwd), &["john"]);
        assert_eq!(strip_time(&first), strip_time(&second));
    }
}

#[test]
fn test_score_follows_guesses() {
    let estimator = Estimator::new(options()).unwrap();
    let mut evaluations: Vec<PasswordEvaluation> = [
        "password",
        "password1",
        "john1987!",
        "correcthorse",
        "correcthorsebatterystaple",
        "k8#Qz!v2@Lp9",
    ]
    .iter()
    .map(|pwd| estimator.check(&secret(pwd), &[]))
    .collect();

    evaluations.sort_by(|a, b| a.guesses.total_cmp(&b.guesses));
    for pair in evaluations.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
    for evaluation in &evaluations {
        assert_eq!(evaluation.score, guesses_to_score(evaluation.guesses));
    }
}

#[test]
fn test_reversed_and_l33t_words() {
    let estimator = Estimator::new(options()).unwrap();

    let evaluation = estimator.check(&secret("drowssap"), &[]);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert!(d.reversed);
    assert_eq!(d.matched_word, "password");

    let evaluation = estimator.check(&secret("p4ssw0rd"), &[]);
    let d = evaluation.sequence[0].dictionary().unwrap();
    assert!(d.l33t);
    assert_eq!(d.sub.get(&'4'), Some(&'a'));
    assert_eq!(d.sub.get(&'0'), Some(&'o'));
}

#[test]
fn test_words_and_year() {
    let estimator = Estimator::new(options()).unwrap();
    let evaluation = estimator.check(&secret("horsestaple2019"), &[]);
    assert_covers(&evaluation);
    let kinds: Vec<PatternKind> = evaluation.sequence.iter().map(|m| m.kind()).collect();
    assert_eq!(
        kinds,
        vec![PatternKind::Dictionary, PatternKind::Dictionary, PatternKind::Regex]
    );
}

/// Deterministic lower-case words of 4 to 12 letters.
fn generated_words(count: usize, mut seed: u64) -> Vec<String> {
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };
    (0..count)
        .map(|_| {
            let len = 4 + next() % 9;
            (0..len).map(|_| (b'a' + (next() % 26) as u8) as char).collect()
        })
        .collect()
}

#[test]
fn test_fuzzy_check_stays_fast_on_large_dictionaries() {
    let options = EstimatorOptions::default()
        .with_dictionary("passwords", generated_words(20_000, 7))
        .with_dictionary("english_wikipedia", generated_words(20_000, 11))
        .with_dictionary("surnames", generated_words(5_000, 13))
        .with_levenshtein(2);
    let estimator = Estimator::new(options).unwrap();
    let password: String = generated_words(12, 17).concat().chars().take(48).collect();

    let start = Instant::now();
    let evaluation = estimator.check(&secret(&password), &["someone@example.com"]);
    let elapsed = start.elapsed();

    assert_covers(&evaluation);
    assert!(elapsed < Duration::from_secs(20), "check took {:?}", elapsed);
}
