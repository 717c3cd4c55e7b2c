use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";
const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_ANALYZER_MODEL: &str = "ANALYZER_MODEL";
const ENV_CHAT_MODEL: &str = "CHAT_MODEL";
const ENV_TESTS_DIR: &str = "TESTS_DIR";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TESTS_DIR: &str = "tests";

/// Keyword and pattern tables for the rule-based scorer.
///
/// Every table is optional; a missing table keeps the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerRulesConfig {
    #[serde(default = "default_strong_weight")]
    pub strong_weight: u32,
    #[serde(default = "default_moderate_weight")]
    pub moderate_weight: u32,
    #[serde(default = "default_pattern_bonus")]
    pub pattern_bonus: u32,
    #[serde(default)]
    pub strong_success: Option<Vec<String>>,
    #[serde(default)]
    pub strong_failure: Option<Vec<String>>,
    #[serde(default)]
    pub moderate_success: Option<Vec<String>>,
    #[serde(default)]
    pub moderate_failure: Option<Vec<String>>,
    #[serde(default)]
    pub success_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub failure_patterns: Option<Vec<String>>,
}

fn default_strong_weight() -> u32 {
    3
}

fn default_moderate_weight() -> u32 {
    1
}

fn default_pattern_bonus() -> u32 {
    2
}

impl Default for AnalyzerRulesConfig {
    fn default() -> Self {
        Self {
            strong_weight: default_strong_weight(),
            moderate_weight: default_moderate_weight(),
            pattern_bonus: default_pattern_bonus(),
            strong_success: None,
            strong_failure: None,
            moderate_success: None,
            moderate_failure: None,
            success_patterns: None,
            failure_patterns: None,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub analyzer: AnalyzerRulesConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub analyzer: AnalyzerRulesConfig,
    /// Provider credential; `None` disables every model-backed feature
    pub api_key: Option<String>,
    /// Model used to classify execution reports
    pub analyzer_model: String,
    /// Model used to generate and execute tests
    pub chat_model: String,
    pub tests_dir: PathBuf,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerRulesConfig::default(),
            api_key: None,
            analyzer_model: DEFAULT_MODEL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            tests_dir: PathBuf::from(DEFAULT_TESTS_DIR),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var(ENV_PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        // Blank keys are treated as absent
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let analyzer_model =
            std::env::var(ENV_ANALYZER_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let chat_model =
            std::env::var(ENV_CHAT_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let tests_dir = std::env::var(ENV_TESTS_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TESTS_DIR));

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let analyzer = Self::load_config_file(&config_path)
            .map(|cf| cf.analyzer)
            .unwrap_or_default();

        Self {
            analyzer,
            api_key,
            analyzer_model,
            chat_model,
            tests_dir,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => parse_config_file(path, &contents),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, using defaults"
                );
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_config_file(path: &Path, contents: &str) -> Option<ConfigFile> {
    let contents = contents.trim();
    if contents.is_empty() {
        tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
        return Some(ConfigFile::default());
    }

    match serde_yaml::from_str(contents) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded configuration from file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to parse config file, using defaults"
            );
            None
        }
    }
}
