//! Settings resolution for fanscribe.
//!
//! The API credential is looked up in the process environment first, then in an
//! optional `.env` file in the working directory. The file is parsed without
//! touching the process environment; everything downstream receives an explicit
//! `Settings` value instead of reading globals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable holding the OpenAI API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Transcription endpoint used unless a test overrides it on the client.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Model requested when no `--model` override is given.
pub const DEFAULT_MODEL: &str = "whisper-1";

/// Errors raised while resolving settings, before any network or audio I/O.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(
        "API key not found. Set OPENAI_API_KEY in the environment or in a .env file \
         in the working directory."
    )]
    MissingApiKey,

    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Resolved application settings, passed by reference through the run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Secret authorizing calls to the transcription service.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
}

impl Settings {
    /// Resolves settings from the process environment and an optional `.env`
    /// file in the current working directory.
    ///
    /// # Errors
    /// - If the `.env` file exists but cannot be read or parsed
    /// - If no non-empty API key is found in either source
    pub fn resolve(model_override: Option<String>) -> Result<Self, SettingsError> {
        let file_vars = load_env_file(Path::new(".env"))?;
        let api_key = resolve_api_key(std::env::var(API_KEY_VAR).ok(), &file_vars)?;

        Ok(Settings {
            api_key,
            model: model_override.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Picks the API key from the environment value or the `.env` file variables.
///
/// An existing environment value wins over the file, matching the conventional
/// dotenv loading order. Empty values count as absent.
fn resolve_api_key(
    env_value: Option<String>,
    file_vars: &HashMap<String, String>,
) -> Result<String, SettingsError> {
    env_value
        .filter(|v| !v.is_empty())
        .or_else(|| file_vars.get(API_KEY_VAR).filter(|v| !v.is_empty()).cloned())
        .ok_or(SettingsError::MissingApiKey)
}

/// Parses a `.env`-style file into a map without mutating the process
/// environment. A missing file is not an error; it simply contributes nothing.
fn load_env_file(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let iter = dotenvy::from_path_iter(path).map_err(|source| SettingsError::EnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|source| SettingsError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        vars.insert(key, value);
    }

    tracing::debug!("Loaded {} variables from {}", vars.len(), path.display());
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_value_wins_over_file() {
        let vars = file_vars(&[(API_KEY_VAR, "from-file")]);
        let key = resolve_api_key(Some("from-env".to_string()), &vars).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_file_value_used_when_env_missing() {
        let vars = file_vars(&[(API_KEY_VAR, "from-file")]);
        let key = resolve_api_key(None, &vars).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let vars = file_vars(&[(API_KEY_VAR, "")]);
        let result = resolve_api_key(Some(String::new()), &vars);
        assert!(matches!(result, Err(SettingsError::MissingApiKey)));
    }

    #[test]
    fn test_missing_key_fails() {
        let result = resolve_api_key(None, &HashMap::new());
        assert!(matches!(result, Err(SettingsError::MissingApiKey)));
    }

    #[test]
    fn test_load_env_file_parses_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "OPENAI_API_KEY=sk-test-123").unwrap();
        writeln!(file, "OTHER=value").unwrap();

        let vars = load_env_file(&path).unwrap();
        assert_eq!(vars.get(API_KEY_VAR).map(String::as_str), Some("sk-test-123"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_load_env_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = load_env_file(&dir.path().join("absent.env")).unwrap();
        assert!(vars.is_empty());
    }
}
