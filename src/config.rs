use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;

pub const DEFAULT_BASE_URL: &str = "https://opensumi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved runtime configuration. Precedence for every field is
/// CLI args > environment > config file > default.
pub struct Config {
    /// Base URL for the conversation/history/recommend endpoints.
    pub api_base_url: String,
    /// Base URL for the streaming completions endpoint; usually the same
    /// host as `api_base_url`.
    pub sse_base_url: String,
    pub timeout_secs: u64,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub sse_base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = FileConfig::load().unwrap_or_default();

        let api_base_url = args
            .api_base_url
            .clone()
            .or_else(|| env::var("DOCASK_API_BASE_URL").ok())
            .or(file_config.api_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // The streaming endpoint falls back to the resolved API host.
        let sse_base_url = args
            .sse_base_url
            .clone()
            .or_else(|| env::var("DOCASK_SSE_BASE_URL").ok())
            .or(file_config.sse_base_url)
            .unwrap_or_else(|| api_base_url.clone());

        let timeout_secs = env::var("DOCASK_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let verbose = args.verbose
            || env::var("DOCASK_VERBOSE")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file_config.verbose)
                .unwrap_or(false);

        if api_base_url.trim().is_empty() {
            return Err("API base URL must not be empty".to_string());
        }

        Ok(Config {
            api_base_url,
            sse_base_url,
            timeout_secs,
            verbose,
        })
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                return Self::load_path(&path);
            }
        }
        Ok(FileConfig::default())
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Local override first, then the user's global config.
        paths.push(PathBuf::from(".docask.yaml"));
        paths.push(PathBuf::from(".docask.yml"));

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("docask");
            paths.push(config_dir.join("docask.yaml"));
            paths.push(config_dir.join("docask.yml"));
        }

        paths
    }
}
