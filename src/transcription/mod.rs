//! Transcription service: format variants, API client, and the fan-out loop.
//!
//! The fan-out issues one remote call per format variant in a fixed order and
//! collects exactly one result per variant. Calls are strictly sequential and
//! fail fast: the first error aborts the run and later variants are never
//! requested.

pub mod api;
pub mod audio;
pub mod format;

pub use api::{ApiClient, Transcript, TranscriptionError};
pub use format::{FormatVariant, ResponseFormat, TimestampGranularity};

/// One collected fan-out result.
#[derive(Debug, Clone)]
pub struct FormatResult {
    pub variant: FormatVariant,
    pub transcript: Transcript,
}

/// Transcribes the audio file once per variant in [`FormatVariant::ALL`] order.
///
/// On success the returned vector holds exactly one entry per variant, in
/// fan-out order. On failure nothing is returned; results gathered before the
/// failing call are discarded (all-or-nothing).
///
/// # Errors
/// - If the audio file cannot be read for any call
/// - If any remote call fails (network, HTTP error, unparseable response)
pub async fn transcribe_all(
    client: &ApiClient,
    audio_path: &std::path::Path,
) -> Result<Vec<FormatResult>, TranscriptionError> {
    let mut results = Vec::with_capacity(FormatVariant::ALL.len());

    for variant in FormatVariant::ALL {
        tracing::info!("Requesting {} transcription", variant);
        let transcript = client.transcribe(audio_path, variant).await?;
        results.push(FormatResult {
            variant,
            transcript,
        });
    }

    Ok(results)
}
