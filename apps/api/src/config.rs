use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::cv::dictionaries::Dictionaries;
use crate::cv::document::DEFAULT_MAX_UPLOAD_BYTES;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Largest accepted CV upload, in bytes.
    pub max_upload_bytes: usize,
    /// Optional JSON file overriding the built-in CV dictionaries.
    pub dictionary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };
        ensure!(max_upload_bytes > 0, "MAX_UPLOAD_BYTES must be greater than 0");

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes,
            dictionary_path: std::env::var("CV_DICTIONARY_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Built-in dictionaries, or the override file when one is configured.
    pub fn load_dictionaries(&self) -> Result<Dictionaries> {
        match &self.dictionary_path {
            Some(path) => Dictionaries::from_json_file(path),
            None => Ok(Dictionaries::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_with(dictionary_path: Option<PathBuf>) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            dictionary_path,
        }
    }

    #[test]
    fn test_no_override_uses_builtin_dictionaries() {
        let dictionaries = config_with(None).load_dictionaries().unwrap();
        assert_eq!(dictionaries, Dictionaries::default());
    }

    #[test]
    fn test_override_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": ["Sage", "Odoo"]}}"#).unwrap();
        let dictionaries = config_with(Some(file.path().to_path_buf()))
            .load_dictionaries()
            .unwrap();
        assert_eq!(dictionaries.skills, vec!["Sage".to_string(), "Odoo".to_string()]);
    }

    #[test]
    fn test_missing_override_file_fails_startup() {
        let config = config_with(Some(PathBuf::from("/nonexistent/cv-dictionaries.json")));
        assert!(config.load_dictionaries().is_err());
    }
}
