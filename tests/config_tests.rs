//! Environment resolution tests for `ClientConfig`.
//!
//! Kept as one test function: the resolution reads fixed env var names, and
//! parallel tests mutating the same vars would interfere.

use std::path::PathBuf;
use std::time::Duration;

use jobline_client::config::{ClientConfig, DEFAULT_TIMEOUT};
use jobline_client::error::ClientError;

#[test]
fn from_env_resolution() {
    // Missing base URL is a configuration error.
    std::env::remove_var("JOBLINE_API_URL");
    std::env::remove_var("JOBLINE_TIMEOUT_SECS");
    std::env::remove_var("JOBLINE_TOKEN_DIR");
    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));

    // URL alone resolves with defaults.
    std::env::set_var("JOBLINE_API_URL", "https://api.jobline.example");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://api.jobline.example");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert!(config.token_dir.is_none());

    // Timeout and token dir are picked up when set.
    std::env::set_var("JOBLINE_TIMEOUT_SECS", "5");
    std::env::set_var("JOBLINE_TOKEN_DIR", "/tmp/jobline-tokens");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.token_dir, Some(PathBuf::from("/tmp/jobline-tokens")));

    // A non-numeric timeout is rejected.
    std::env::set_var("JOBLINE_TIMEOUT_SECS", "soon");
    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));

    std::env::remove_var("JOBLINE_API_URL");
    std::env::remove_var("JOBLINE_TIMEOUT_SECS");
    std::env::remove_var("JOBLINE_TOKEN_DIR");
}

#[test]
fn builder_settings_override_defaults() {
    let config = ClientConfig::new("https://api.jobline.example")
        .with_timeout(Duration::from_secs(10))
        .with_token_dir(PathBuf::from("/tmp/elsewhere"));
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.token_dir, Some(PathBuf::from("/tmp/elsewhere")));
}
