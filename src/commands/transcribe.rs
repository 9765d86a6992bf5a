//! Transcribe an audio file and persist the results.
//!
//! Default mode fans the file out to every response format and writes one
//! output file per format. Text-only mode issues a single plain-text request,
//! writes `transcription.txt`, and echoes the text to stdout.

use std::path::PathBuf;

use anyhow::{anyhow, Context};

use crate::output;
use crate::settings::Settings;
use crate::transcription::{self, ApiClient, FormatVariant, Transcript};

/// Output mode for a transcription run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One remote call and one output file per format variant.
    FanOut,
    /// A single plain-text call written to `transcription.txt`.
    TextOnly,
}

/// Handles the transcribe command.
///
/// # Arguments
/// * `file` - Path to the audio file to transcribe
/// * `mode` - Fan-out over all formats, or plain text only
/// * `output_dir` - Directory for output files, defaults to the working directory
/// * `model` - Optional model override
pub async fn handle_transcribe(
    file: PathBuf,
    mode: OutputMode,
    output_dir: Option<PathBuf>,
    model: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== fanscribe transcribe ===");

    // Credential resolution comes first: a missing key fails the run before
    // any audio I/O or network access.
    let settings = Settings::resolve(model).context("Failed to resolve settings")?;

    if !file.exists() {
        return Err(anyhow!("Audio file not found: {}", file.display()));
    }

    let client = ApiClient::new(&settings);
    let out_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));

    tracing::info!(
        "Transcribing {} with model {} ({:?} mode)",
        file.display(),
        settings.model,
        mode
    );

    match mode {
        OutputMode::FanOut => {
            let base_name = file
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    anyhow!("Could not derive a base name from {}", file.display())
                })?;

            let results = transcription::transcribe_all(&client, &file)
                .await
                .map_err(|e| {
                    tracing::error!("Transcription failed: {e}");
                    anyhow!("Transcription failed: {e}")
                })?;

            output::persist(&results, &base_name, &out_dir)
                .context("Failed to write transcription files")?;
        }
        OutputMode::TextOnly => {
            let transcript = client
                .transcribe(&file, FormatVariant::Text)
                .await
                .map_err(|e| {
                    tracing::error!("Transcription failed: {e}");
                    anyhow!("Transcription failed: {e}")
                })?;

            let text = match transcript {
                Transcript::Text(text) => text,
                Transcript::Json(_) => unreachable!("text variant returns a raw body"),
            };

            output::persist_text(&text, &out_dir)
                .context("Failed to write transcription file")?;
            println!("{text}");
        }
    }

    Ok(())
}
