//! Integration tests for armature-config

use armature_config::*;
use std::io::Write;

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "CSRF_ENABLED = false").unwrap();
    writeln!(file, "CSRF_SESSION_KEY = \"_signup_token\"").unwrap();

    let config = AppConfig::new();
    let count = config.load_file(file.path()).unwrap();

    assert_eq!(count, 2);
    assert_eq!(config.get_bool_opt("CSRF_ENABLED").unwrap(), Some(false));
    assert_eq!(config.get_string("CSRF_SESSION_KEY").unwrap(), "_signup_token");
}

#[test]
fn test_load_json_file_with_explicit_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"CSRF_ENABLED": "0"}}"#).unwrap();

    let config = AppConfig::new();
    config.load_file_as(file.path(), FileFormat::Json).unwrap();

    assert!(!config.get_bool("CSRF_ENABLED").unwrap());
}

#[test]
fn test_load_file_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    let config = AppConfig::new();

    assert!(matches!(
        config.load_file(file.path()),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let config = AppConfig::new();
    let result = config.load_file_as("/nonexistent/settings.toml", FileFormat::Toml);

    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_load_str_overrides_earlier_values() {
    let config = AppConfig::from_pairs([("CSRF_ENABLED", true)]).unwrap();
    config
        .load_str("CSRF_ENABLED=off\n", FileFormat::Env)
        .unwrap();

    assert!(!config.get_bool("CSRF_ENABLED").unwrap());
}

#[test]
fn test_load_env_reads_process_environment() {
    // PATH is set on every platform the tests run on
    let config = AppConfig::new();
    let count = config.load_env(None).unwrap();

    assert!(count > 0);
    if std::env::var("PATH").is_ok() {
        assert!(config.has("PATH"));
    }
}

#[test]
fn test_load_dotenv_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ARMATURE_DOTENV_TEST_CSRF_ENABLED=false").unwrap();
    writeln!(file, "ARMATURE_DOTENV_TEST_CSRF_SESSION_KEY=_dotenv_token").unwrap();

    let config = AppConfig::new();
    let count = config
        .load_dotenv(Some(file.path()), Some("ARMATURE_DOTENV_TEST"))
        .unwrap();

    assert_eq!(count, 2);
    assert!(!config.get_bool("CSRF_ENABLED").unwrap());
    assert_eq!(config.get_string("CSRF_SESSION_KEY").unwrap(), "_dotenv_token");
}

#[test]
fn test_load_dotenv_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new();
    let result = config.load_dotenv(Some(&dir.path().join("missing.env")), None);

    assert!(matches!(result, Err(ConfigError::LoadError(_))));
    assert!(config.keys().is_empty());
}
