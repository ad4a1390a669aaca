//! Reloading, resetting and observing a shared configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bsl_ls::config::{
    ComputeTrigger, ConfigurationEvent, DiagnosticsMode, Language, LanguageServerConfiguration,
    LspFeature, SchemaDriftPolicy, SkipSupport,
};
use parking_lot::Mutex;
use rstest::rstest;
use tempfile::TempDir;

fn write_config(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join(".bsl-language-server.json");
    fs::write(&path, json).expect("write configuration");
    path
}

/// Records events as short strings, in delivery order.
fn record_events(config: &LanguageServerConfiguration) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    config.subscribe(move |event: &ConfigurationEvent<'_>| {
        let entry = match event {
            ConfigurationEvent::FileChanged(path) => format!("file:{}", file_name(path)),
            ConfigurationEvent::Changed(config) => format!("changed:{}", config.language().as_str()),
        };
        sink.lock().push(entry);
    });
    log
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[test]
fn test_update_reads_every_section() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"{
            "language": "en",
            "diagnostics": {
                "computeTrigger": "onType",
                "skipSupport": "withSupportLocked",
                "mode": "except",
                "ordinaryAppSupport": false,
                "parameters": { "LineLength": { "maxLineLength": 140 }, "MagicNumber": false }
            },
            "codeLens": { "parameters": { "cognitiveComplexity": true } },
            "documentLink": { "showDiagnosticDescription": true },
            "traceLog": "trace.log",
            "configurationRoot": "src/cf"
        }"#,
    );

    let config = LanguageServerConfiguration::new();
    config.update(&path);

    let diagnostics = config.diagnostics();
    assert_eq!(config.language(), Language::English);
    assert_eq!(diagnostics.compute_trigger, ComputeTrigger::OnType);
    assert_eq!(diagnostics.skip_support, SkipSupport::WithSupportLocked);
    assert_eq!(diagnostics.mode, DiagnosticsMode::Except);
    assert!(!diagnostics.ordinary_app_support);
    assert_eq!(
        diagnostics.parameters.get("LineLength"),
        Some(&serde_json::json!({ "maxLineLength": 140 }))
    );
    assert_eq!(
        config.code_lens().parameters.get("cognitiveComplexity"),
        Some(&serde_json::Value::Bool(true))
    );
    assert!(config.document_link().show_diagnostic_description);
    assert_eq!(config.trace_log(), Some(PathBuf::from("trace.log")));
    assert_eq!(config.configuration_root(), Some(PathBuf::from("src/cf")));
    assert_eq!(config.configuration_file(), path);
}

#[rstest]
#[case::canonical(r#"{ "diagnostics": { "computeTrigger": "onType" } }"#)]
#[case::upper(r#"{ "diagnostics": { "computeTrigger": "ONTYPE" } }"#)]
#[case::lower(r#"{ "diagnostics": { "computeTrigger": "ontype" } }"#)]
fn test_enum_values_ignore_case(#[case] json: &str) {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();

    config.update(&write_config(&dir, json));

    assert_eq!(config.diagnostics().compute_trigger, ComputeTrigger::OnType);
}

#[test]
fn test_update_keeps_handle_identity() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    let held_elsewhere = Arc::clone(&config);

    config.update(&write_config(&dir, r#"{ "language": "en" }"#));

    assert!(Arc::ptr_eq(&config, &held_elsewhere));
    assert_eq!(held_elsewhere.language(), Language::English);
}

#[test]
fn test_missing_file_is_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    config.set_language(Language::English);
    let events = record_events(&config);

    config.update(&dir.path().join("absent.json"));

    assert_eq!(config.language(), Language::English);
    assert_eq!(config.configuration_file(), PathBuf::from(".bsl-language-server.json"));
    assert!(events.lock().is_empty());
}

#[rstest]
#[case::not_json("{ language: ")]
#[case::bad_enum(r#"{ "language": "fr" }"#)]
#[case::wrong_type(r#"{ "diagnostics": { "ordinaryAppSupport": "yes" } }"#)]
fn test_malformed_file_keeps_previous_state(#[case] json: &str) {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    config.update(&write_config(&dir, r#"{ "language": "en" }"#));
    let events = record_events(&config);

    let other = dir.path().join("broken.json");
    fs::write(&other, json).expect("write configuration");
    config.update(&other);

    assert_eq!(config.language(), Language::English);
    assert_eq!(file_name(&config.configuration_file()), ".bsl-language-server.json");
    assert!(events.lock().is_empty());
}

#[test]
fn test_update_notifies_file_then_change() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    let events = record_events(&config);

    config.update(&write_config(&dir, r#"{ "language": "en" }"#));

    assert_eq!(
        *events.lock(),
        vec![
            "file:.bsl-language-server.json".to_string(),
            "changed:en".to_string()
        ]
    );
}

#[test]
fn test_observer_sees_file_before_values() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    let seen = Arc::new(Mutex::new(None));

    let sink = Arc::clone(&seen);
    let observed = Arc::downgrade(&config);
    config.subscribe(move |event: &ConfigurationEvent<'_>| {
        if let (ConfigurationEvent::FileChanged(_), Some(config)) = (event, observed.upgrade()) {
            *sink.lock() = Some(config.language());
        }
    });

    config.update(&write_config(&dir, r#"{ "language": "en" }"#));

    assert_eq!(*seen.lock(), Some(Language::Russian));
}

#[test]
fn test_absent_keys_fall_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    config.update(&write_config(
        &dir,
        r#"{ "language": "en", "diagnostics": { "mode": "off" } }"#,
    ));

    config.update(&write_config(&dir, r#"{ "documentLink": { "showDiagnosticDescription": true } }"#));

    assert_eq!(config.language(), Language::Russian);
    assert_eq!(config.diagnostics().mode, DiagnosticsMode::On);
    assert!(config.document_link().show_diagnostic_description);
}

#[test]
fn test_reset_restores_defaults_in_place() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    let path = write_config(
        &dir,
        r#"{ "language": "en", "diagnostics": { "mode": "only" }, "traceLog": "t.log" }"#,
    );
    config.update(&path);
    config.add_lsp_feature(LspFeature::Diagnostics);
    let events = record_events(&config);
    let held_elsewhere = Arc::clone(&config);

    config.reset();

    assert!(Arc::ptr_eq(&config, &held_elsewhere));
    assert_eq!(held_elsewhere.language(), Language::Russian);
    assert_eq!(held_elsewhere.diagnostics().mode, DiagnosticsMode::On);
    assert_eq!(held_elsewhere.trace_log(), None);
    assert!(!held_elsewhere.is_lsp_feature(LspFeature::Diagnostics));
    // The file the values came from is still remembered
    assert_eq!(held_elsewhere.configuration_file(), path);
    assert_eq!(
        *events.lock(),
        vec![
            "file:.bsl-language-server.json".to_string(),
            "changed:ru".to_string()
        ]
    );
}

#[rstest]
#[case::ignore(SchemaDriftPolicy::Ignore, Language::English)]
#[case::warn(SchemaDriftPolicy::Warn, Language::English)]
#[case::fail(SchemaDriftPolicy::Fail, Language::Russian)]
fn test_unknown_keys_follow_drift_policy(
    #[case] policy: SchemaDriftPolicy,
    #[case] expected: Language,
) {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::with_drift_policy(policy);

    config.update(&write_config(
        &dir,
        r#"{ "language": "en", "sendErrors": "ask", "diagnostics": { "metadata": {} } }"#,
    ));

    assert_eq!(config.language(), expected);
}

#[test]
fn test_observers_may_read_during_notification() {
    let dir = TempDir::new().expect("temp dir");
    let config = LanguageServerConfiguration::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    config.subscribe(move |event: &ConfigurationEvent<'_>| {
        if let ConfigurationEvent::Changed(config) = event {
            sink.lock().push((config.language(), config.configuration_file()));
        }
    });

    let path = write_config(&dir, r#"{ "language": "en" }"#);
    config.update(&path);

    assert_eq!(*seen.lock(), vec![(Language::English, path)]);
}
