//! End-to-end review scenarios against the public engine API.

use std::io::Write;

use termlint::analysis::extract::extract;
use termlint::{Convention, ReasonCode, ReviewEngine, TermlintConfig};

fn default_engine() -> ReviewEngine {
    ReviewEngine::new(TermlintConfig::default()).expect("default engine should build")
}

#[test]
fn abbreviated_identifier_gets_dictionary_backed_expansion() {
    let engine = default_engine();

    let suggestion = engine
        .review_identifier("usr_id", Convention::Snake)
        .expect("usr_id should produce a suggestion");

    assert_eq!(suggestion.original, "usr_id");
    assert_eq!(suggestion.suggested, "user_id");
    assert!(matches!(
        suggestion.reason_code,
        ReasonCode::MeaninglessAbbreviation | ReasonCode::DictionaryMismatch
    ));
    assert!(suggestion.confidence >= 0.85);
}

#[test]
fn convention_violation_reformats_unknown_identifier() {
    let engine = default_engine();

    let suggestion = engine
        .review_identifier("myCustomThing", Convention::Snake)
        .expect("camelCase name should be flagged under snake target");

    assert_eq!(suggestion.suggested, "my_custom_thing");
    assert_eq!(suggestion.reason_code, ReasonCode::ConventionMismatch);
    assert!((suggestion.confidence - 0.8).abs() < f64::EPSILON);
}

#[test]
fn camel_case_alias_resolves_through_expansion() {
    let engine = default_engine();

    // Underscore-rejoining "userName" yields "user_Name", an alias of the
    // dictionary term "username"; the abbreviation rule catches it before
    // the exact-lookup dictionary rule ever sees the name.
    let suggestion = engine
        .review_identifier("userName", Convention::Snake)
        .unwrap();
    assert_eq!(suggestion.reason_code, ReasonCode::MeaninglessAbbreviation);
    assert_eq!(suggestion.suggested, "username");
    assert!((suggestion.confidence - 0.85).abs() < f64::EPSILON);
}

#[test]
fn compound_localized_name_is_decomposed() {
    let engine = default_engine();

    // The non-Latin run holds two adjacent localized words; each resolves
    // on its own and the rewrites concatenate.
    let suggestion = engine
        .review_identifier("사용자이름_id", Convention::Snake)
        .unwrap();
    assert_eq!(suggestion.reason_code, ReasonCode::MixedLanguage);
    assert_eq!(suggestion.suggested, "username_id");
}

#[test]
fn empty_source_produces_empty_report() {
    let engine = default_engine();

    assert!(extract("").is_empty());

    let report = engine.review("");
    assert_eq!(report.analyzed, 0);
    assert!(report.is_clean());
}

#[test]
fn undecodable_terminology_source_falls_back_to_builtin() {
    // Invalid as UTF-8 and as EUC-KR, so every candidate encoding is
    // rejected and the builtin vocabulary takes over.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xFF, 0xFE, 0xFF, 0x00, 0x80, 0xFF]).unwrap();

    let mut config = TermlintConfig::default();
    config.dictionary.csv_path = Some(file.path().to_path_buf());

    let engine = ReviewEngine::new(config).unwrap();
    let entry = engine.store().lookup("password").unwrap();
    assert_eq!(entry.standard_form, "password");
    assert_eq!(engine.store().lookup("pwd").unwrap().standard_form, "password");
}

#[test]
fn conforming_dictionary_identifier_yields_nothing() {
    let engine = default_engine();
    assert!(engine.review_identifier("total", Convention::Snake).is_none());
}

#[test]
fn review_is_deterministic() {
    let engine = default_engine();
    let source = "def login(usr_id, pwd):\n    res = check(usr_id)\n    return res\n";

    let first = engine.review(source);
    let second = engine.review(source);

    assert_eq!(first.convention, second.convention);
    assert_eq!(first.suggestions, second.suggestions);
}

#[test]
fn suggestions_never_equal_their_original() {
    let engine = default_engine();
    let source = "\
def process(usr, data, cnt):
    temp = []
    for itm in data:
        temp = update(temp, itm)
    err_msg = ''
    resultValue = finish(temp)
";

    let report = engine.review(source);
    assert!(!report.suggestions.is_empty());
    for suggestion in &report.suggestions {
        assert_ne!(suggestion.suggested, suggestion.original, "{}", suggestion.original);
        assert!((0.0..=1.0).contains(&suggestion.confidence));
    }
}

#[test]
fn higher_priority_rule_wins_over_convention() {
    let engine = default_engine();

    // Violates snake_case and contains an abbreviation; only the
    // abbreviation suggestion comes back.
    let suggestion = engine.review_identifier("usrId", Convention::Snake).unwrap();
    assert_eq!(suggestion.reason_code, ReasonCode::MeaninglessAbbreviation);
    assert_eq!(suggestion.suggested, "user_id");
}

#[test]
fn applying_suggestions_respects_word_boundaries() {
    let engine = default_engine();
    let source = "cfg = load()\nprint(cfg)\ncfgx = other()\n";

    let report = engine.review(source);
    let rewritten = engine.apply_suggestions(source, &report.suggestions).unwrap();

    assert!(rewritten.contains("config = load()"));
    assert!(rewritten.contains("print(config)"));
    // "cfgx" is its own identifier; "cfg" inside it stays untouched.
    assert!(rewritten.contains("cfgx = other()"));
}

#[test]
fn evidence_mode_reports_signals_and_alternatives() {
    let engine = default_engine();
    let suggestions = engine.review_with_evidence("def save(usr_id):\n    res = commit()\n");

    let usr = suggestions
        .iter()
        .find(|s| s.original == "usr_id")
        .expect("usr_id should be analyzed");
    assert_eq!(usr.suggested, "user_id");
    assert!(!usr.evidence.is_empty());
    for pair in usr.evidence.windows(2) {
        assert!(pair[0].weight >= pair[1].weight);
    }
    assert!((0.0..=1.0).contains(&usr.confidence));
}

#[test]
fn custom_terms_persist_between_engines() {
    let dir = tempfile::tempdir().unwrap();
    let custom_path = dir.path().join("custom_terms.json");

    let mut config = TermlintConfig::default();
    config.dictionary.custom_terms_path = Some(custom_path.clone());

    let mut engine = ReviewEngine::new(config.clone()).unwrap();
    assert!(engine
        .store_mut()
        .add("Tenant Identifier", "tnt", "tenant routing key", &[]));
    assert_eq!(engine.save_custom_terms().unwrap(), 1);

    let reloaded = ReviewEngine::new(config).unwrap();
    let suggestion = reloaded
        .review_identifier("TNT", Convention::Snake)
        .expect("persisted custom term should drive a suggestion");
    assert_eq!(suggestion.suggested, "tnt");
}
