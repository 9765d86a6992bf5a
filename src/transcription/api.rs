//! OpenAI Whisper API client.
//!
//! Issues transcription requests as multipart form data with bearer token
//! authentication. One request per format variant; the audio file is re-read
//! from disk for every call so each request carries the full payload.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::audio::mime_for_path;
use super::format::FormatVariant;
use crate::settings::{Settings, DEFAULT_ENDPOINT};

/// Errors raised by a single transcription call.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("failed to read audio file {path}: {source}")]
    AudioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

/// One transcript as returned by the API: a JSON document for the structured
/// variants, the raw response body otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Transcript {
    Text(String),
    Json(serde_json::Value),
}

/// Error body returned by the API, `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Authenticated handle to the transcription endpoint. Holds the credential
/// and model for the lifetime of the run; stateless between calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ApiClient {
    /// Builds a client from resolved settings. Pure construction; the remote
    /// service validates the credential lazily on the first call.
    pub fn new(settings: &Settings) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    /// Overrides the transcription endpoint. Used to point the client at a
    /// local mock server.
    #[cfg(test)]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Transcribes an audio file with the response shape of one variant.
    ///
    /// Reads the file fresh from offset zero, posts it as multipart form data,
    /// and returns the parsed JSON document for structured variants or the raw
    /// body text otherwise.
    ///
    /// # Errors
    /// - If the audio file cannot be read from disk
    /// - If the request fails due to network issues (connection, timeout)
    /// - If the API returns an HTTP error (401 for invalid key, 429 for rate limit, etc.)
    /// - If the API response cannot be parsed
    pub async fn transcribe(
        &self,
        audio_path: &Path,
        variant: FormatVariant,
    ) -> Result<Transcript, TranscriptionError> {
        let audio_data =
            std::fs::read(audio_path).map_err(|source| TranscriptionError::AudioRead {
                path: audio_path.to_path_buf(),
                source,
            })?;

        let file_name = audio_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let file_part = reqwest::multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime_for_path(audio_path))
            .map_err(|e| {
                TranscriptionError::Network(format!("Failed to create file part for upload: {e}"))
            })?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        if let Some(granularity) = variant.granularity() {
            form = form.text("timestamp_granularities[]", granularity.as_str());
        }

        let response_format = variant.response_format().as_str();
        let url = format!("{}?response_format={response_format}", self.endpoint);

        tracing::debug!(
            "API call: POST {} model={} variant={} (Authorization: Bearer <redacted>)",
            url,
            self.model,
            variant
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_connect() {
                    "Failed to connect to the API server. Check your internet connection."
                        .to_string()
                } else if e.is_timeout() {
                    "Request timed out. The API server is not responding.".to_string()
                } else {
                    format!("Network error: {e}")
                };
                TranscriptionError::Network(message)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                message: human_readable_status(status.as_u16(), &body),
            });
        }

        if variant.is_structured() {
            let value: serde_json::Value = response
                .json()
                .await
                .map_err(|e| TranscriptionError::Parse(e.to_string()))?;
            tracing::debug!("Received {} response ({} document)", variant, response_format);
            Ok(Transcript::Json(value))
        } else {
            let body = response
                .text()
                .await
                .map_err(|e| TranscriptionError::Parse(e.to_string()))?;
            tracing::debug!("Received {} response ({} characters)", variant, body.len());
            Ok(Transcript::Text(body))
        }
    }
}

/// Maps an HTTP error status to a human-readable message, preferring the
/// message field of the API's error body over the raw text.
fn human_readable_status(status: u16, body: &str) -> String {
    let api_message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 => "API key is invalid or expired. Check OPENAI_API_KEY.".to_string(),
        403 => "You don't have permission to use this API. Check your API key and account status."
            .to_string(),
        429 => "Too many requests. You've hit the API rate limit. Please wait and try again."
            .to_string(),
        500 | 502 | 503 | 504 => {
            "The API server is experiencing issues. Please try again later.".to_string()
        }
        _ => api_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_status_known_codes() {
        assert!(human_readable_status(401, "").contains("OPENAI_API_KEY"));
        assert!(human_readable_status(429, "").contains("rate limit"));
        assert!(human_readable_status(503, "").contains("try again later"));
    }

    #[test]
    fn test_human_readable_status_extracts_api_message() {
        let body = r#"{"error":{"message":"Invalid file format."}}"#;
        assert_eq!(human_readable_status(400, body), "Invalid file format.");
    }

    #[test]
    fn test_human_readable_status_falls_back_to_raw_body() {
        assert_eq!(human_readable_status(400, "plain failure"), "plain failure");
    }
}
