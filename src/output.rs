//! Persists collected transcripts to the output directory.
//!
//! One file per fan-out result, named by the variant's filename rule. Writes
//! are sequential and overwrite whatever is already there, so re-running with
//! identical results produces byte-identical files.

use std::path::{Path, PathBuf};

use crate::transcription::{FormatResult, Transcript};

/// Errors raised while writing transcript files.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to serialize {label} transcript: {source}")]
    Serialize {
        label: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes one file per result into `out_dir`, reporting each write to stdout
/// in fan-out order.
///
/// JSON transcripts are serialized with `serde_json`; text transcripts are
/// written verbatim. Returns the written paths in write order.
///
/// # Errors
/// - If a transcript cannot be serialized
/// - If a file cannot be written (permissions, disk)
pub fn persist(
    results: &[FormatResult],
    base_name: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, PersistError> {
    let mut written = Vec::with_capacity(results.len());

    for result in results {
        let path = out_dir.join(result.variant.output_file_name(base_name));
        let content = render(&result.transcript, result.variant.label())?;

        std::fs::write(&path, content).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Transcription saved to {}", path.display());
        println!("Transcription saved to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Writes the plain transcribed text to `transcription.txt` in `out_dir`.
/// Single-format counterpart of [`persist`].
///
/// # Errors
/// - If the file cannot be written
pub fn persist_text(text: &str, out_dir: &Path) -> Result<PathBuf, PersistError> {
    let path = out_dir.join("transcription.txt");
    std::fs::write(&path, text).map_err(|source| PersistError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Transcription saved to {}", path.display());
    Ok(path)
}

fn render(transcript: &Transcript, label: &'static str) -> Result<String, PersistError> {
    match transcript {
        Transcript::Text(text) => Ok(text.clone()),
        Transcript::Json(value) => {
            serde_json::to_string(value).map_err(|source| PersistError::Serialize { label, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::FormatVariant;

    fn results() -> Vec<FormatResult> {
        vec![
            FormatResult {
                variant: FormatVariant::Text,
                transcript: Transcript::Text("hello world".to_string()),
            },
            FormatResult {
                variant: FormatVariant::Json,
                transcript: Transcript::Json(serde_json::json!({"text": "hello world"})),
            },
        ]
    }

    #[test]
    fn test_persist_writes_one_file_per_result() {
        let dir = tempfile::tempdir().unwrap();
        let written = persist(&results(), "clip1", dir.path()).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("clip1.text"), dir.path().join("clip1.json")]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("clip1.text")).unwrap(),
            "hello world"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("clip1.json")).unwrap(),
            r#"{"text":"hello world"}"#
        );
    }

    #[test]
    fn test_persist_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        persist(&results(), "clip1", dir.path()).unwrap();
        let first = std::fs::read(dir.path().join("clip1.json")).unwrap();

        persist(&results(), "clip1", dir.path()).unwrap();
        let second = std::fs::read(dir.path().join("clip1.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_persist_verbose_variant_filename() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![FormatResult {
            variant: FormatVariant::VerboseJsonWord,
            transcript: Transcript::Json(serde_json::json!({"text": "hi", "words": []})),
        }];

        let written = persist(&results, "recording", dir.path()).unwrap();
        assert_eq!(
            written,
            vec![dir.path().join("recording_verbose_json_word.json")]
        );
    }

    #[test]
    fn test_persist_text_fixed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = persist_text("hello world", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("transcription.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello world");
    }

    #[test]
    fn test_persist_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = persist(&results(), "clip1", &missing).unwrap_err();
        assert!(matches!(err, PersistError::Write { .. }));
    }
}
