//! Tests for config loading

use playtrend::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_CONFIG: &str = r#"
seed_topics = ["Battery drain", "Login loop"]

[app]
app_id = "com.example.food"
country = "us"
language = "en"

[analysis]
lookback_days = 13
max_reviews_per_day = 25
min_topic_frequency = 1
growth_threshold = 0.25
top_n = 3
sample_seed = 1

[[topics]]
name = "Battery drain"
patterns = ["battery.*drain", "drains.*battery"]

[[topics]]
name = "Login loop"
patterns = ["login", "sign.*in"]

[output]
reports_dir = "reports"

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.app.app_id, "com.example.food");
    assert_eq!(config.analysis.lookback_days, 13);
    assert_eq!(config.seed_topics, vec!["Battery drain", "Login loop"]);

    let classifier = config.classifier().unwrap();
    assert_eq!(
        classifier.matched_topics("This update DRAINS my battery and I can't sign in"),
        vec!["Battery drain", "Login loop"]
    );
}

#[test]
fn test_missing_config_file_is_error() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/playtrend.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_malformed_config_file_is_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[analysis\nlookback_days = ").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML config file"));
}
