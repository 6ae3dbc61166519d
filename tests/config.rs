use docask::cli::Args;
use docask::config::{Config, FileConfig, DEFAULT_BASE_URL};

fn bare_args() -> Args {
    Args {
        serve: false,
        recommend: None,
        history: None,
        api_base_url: None,
        sse_base_url: None,
        verbose: false,
        question: vec![],
    }
}

fn clear_env() {
    std::env::remove_var("DOCASK_API_BASE_URL");
    std::env::remove_var("DOCASK_SSE_BASE_URL");
    std::env::remove_var("DOCASK_TIMEOUT");
    std::env::remove_var("DOCASK_VERBOSE");
}

#[test]
fn file_config_parses_yaml() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("docask.yaml");
    std::fs::write(
        &path,
        "api_base_url: https://docs.example.com\ntimeout_secs: 10\nverbose: true\n",
    )
    .unwrap();

    let config = FileConfig::load_path(&path).unwrap();
    assert_eq!(config.api_base_url.as_deref(), Some("https://docs.example.com"));
    assert_eq!(config.timeout_secs, Some(10));
    assert_eq!(config.verbose, Some(true));
    assert!(config.sse_base_url.is_none());
}

#[test]
fn file_config_rejects_malformed_yaml() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("docask.yaml");
    std::fs::write(&path, "api_base_url: [unterminated\n").unwrap();

    assert!(FileConfig::load_path(&path).is_err());
}

// Environment-variable cases share one test so parallel tests never race
// on the process environment.
#[test]
fn precedence_args_env_default() {
    clear_env();

    // Defaults: production host for both URL families.
    let config = Config::from_env_and_args(&bare_args()).unwrap();
    assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    assert_eq!(config.sse_base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout_secs, 30);
    assert!(!config.verbose);

    // Env beats the default, and the SSE URL follows the API URL when not
    // set on its own.
    std::env::set_var("DOCASK_API_BASE_URL", "https://env.example.com");
    let config = Config::from_env_and_args(&bare_args()).unwrap();
    assert_eq!(config.api_base_url, "https://env.example.com");
    assert_eq!(config.sse_base_url, "https://env.example.com");

    // CLI args beat env, and the two base URLs are independent.
    let mut args = bare_args();
    args.api_base_url = Some("https://cli.example.com".to_string());
    args.sse_base_url = Some("https://sse.example.com".to_string());
    let config = Config::from_env_and_args(&args).unwrap();
    assert_eq!(config.api_base_url, "https://cli.example.com");
    assert_eq!(config.sse_base_url, "https://sse.example.com");

    clear_env();
}
