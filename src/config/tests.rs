use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_review_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("REVIEW_ANNOTATIONS_DIR");
        env::remove_var("REVIEW_PAGE_SIZE");
        env::remove_var("REVIEW_ROW_WIDTH");
        env::remove_var("REVIEW_EXTENSION");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.annotations_dir, PathBuf::from("annotations"));
    assert_eq!(config.page_size.get(), 10);
    assert_eq!(config.row_width.get(), 3);
    assert_eq!(config.extension, "json");
    assert_eq!(config.pager().page_size(), 10);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_review_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.annotations_dir, PathBuf::from("annotations"));
    assert_eq!(config.page_size.get(), 10);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_review_env();

    let config = with_env_vars(
        &[
            ("REVIEW_ANNOTATIONS_DIR", "/data/reviews"),
            ("REVIEW_PAGE_SIZE", "24"),
            ("REVIEW_ROW_WIDTH", " 4 "),
            ("REVIEW_EXTENSION", ".review"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.annotations_dir, PathBuf::from("/data/reviews"));
    assert_eq!(config.page_size.get(), 24);
    assert_eq!(config.row_width.get(), 4);
    assert_eq!(config.extension, "review");
}

#[test]
#[serial]
fn test_blank_dir_falls_back_to_default() {
    clear_review_env();

    let config = with_env_vars(&[("REVIEW_ANNOTATIONS_DIR", "   ")], Config::from_env)
        .expect("should parse");

    assert_eq!(config.annotations_dir, PathBuf::from("annotations"));
}

#[test]
#[serial]
fn test_invalid_page_size() {
    clear_review_env();

    let result = with_env_vars(&[("REVIEW_PAGE_SIZE", "ten")], Config::from_env);

    match result {
        Err(ConfigError::InvalidNumber { name, value, .. }) => {
            assert_eq!(name, "REVIEW_PAGE_SIZE");
            assert_eq!(value, "ten");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_zero_row_width() {
    clear_review_env();

    let result = with_env_vars(&[("REVIEW_ROW_WIDTH", "0")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::ZeroValue {
            name: "REVIEW_ROW_WIDTH"
        })
    ));
}

#[test]
#[serial]
fn test_empty_extension() {
    clear_review_env();

    let result = with_env_vars(&[("REVIEW_EXTENSION", ".")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::EmptyExtension)));
}

#[test]
fn test_validate_rejects_file_as_dir() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let config = Config {
        annotations_dir: file.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_accepts_missing_dir() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = Config {
        annotations_dir: dir.path().join("not-yet"),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
    assert_eq!(config.record_store().root(), dir.path().join("not-yet"));
}

#[test]
fn test_error_display() {
    let err = ConfigError::ZeroValue {
        name: "REVIEW_PAGE_SIZE",
    };
    assert_eq!(err.to_string(), "REVIEW_PAGE_SIZE must be greater than zero");

    let err = ConfigError::NotADirectory {
        path: PathBuf::from("/tmp/x"),
    };
    assert!(err.to_string().contains("/tmp/x"));
}
