//! Application configuration.
//!
//! Loads settings from config.json at startup. Every field has a default, so
//! a partial file only overrides what it names. The loaded value is passed
//! down explicitly; nothing reads configuration from a global.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that supplies the search API key when config.json doesn't.
pub const SEARCH_KEY_ENV: &str = "TRIVIA_SEARCH_KEY";

/// Tesseract location and invocation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Explicit path to the tesseract executable
    pub executable: Option<PathBuf>,
    /// Explicit tessdata directory
    pub tessdata: Option<PathBuf>,
    /// Recognition language
    pub language: String,
    /// Page segmentation mode (3 = fully automatic)
    pub psm: u8,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            executable: None,
            tessdata: None,
            language: "eng".to_string(),
            psm: 3,
        }
    }
}

/// Web search endpoint settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// JSON search endpoint; the query is sent as `q`
    pub endpoint: String,
    /// Sent as `key` when non-empty
    pub api_key: String,
    /// Sent as `cx` when non-empty
    pub engine_id: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Substring of a response that means the provider blocked us
    pub bot_marker: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: String::new(),
            engine_id: String::new(),
            user_agent: concat!("trivia-solver/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            bot_marker: "Our systems have detected unusual traffic".to_string(),
        }
    }
}

/// Complete solver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Word-list file with `[filtered words]` and `[negative words]` sections
    pub settings_path: Option<PathBuf>,
    pub tesseract: TesseractConfig,
    /// Binarize screenshots before OCR (pixels darker than this become text)
    pub ocr_threshold: Option<u8>,
    pub search: SearchConfig,
    /// How often live mode checks the screenshot for changes (milliseconds)
    pub live_poll_ms: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            tesseract: TesseractConfig::default(),
            ocr_threshold: None,
            search: SearchConfig::default(),
            live_poll_ms: 500,
        }
    }
}

/// Loads configuration from `path`, or from config.json next to the
/// executable. Missing or unreadable files fall back to defaults.
pub fn load_config(path: Option<&Path>) -> SolverConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| crate::paths::get_exe_dir().join("config.json"));

    crate::log(&format!("Looking for config at: {}", config_path.display()));

    let mut config = if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    ));
                    SolverConfig::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read {}: {}. Using defaults.",
                    config_path.display(),
                    e
                ));
                SolverConfig::default()
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
        SolverConfig::default()
    };

    if config.search.api_key.is_empty() {
        if let Ok(key) = std::env::var(SEARCH_KEY_ENV) {
            config.search.api_key = key;
        }
    }

    config
}
