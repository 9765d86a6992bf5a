//! fanscribe — transcribe one audio file into every Whisper response format.

mod app;
mod commands;
mod logging;
mod output;
mod settings;
mod transcription;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    app::run().await
}
