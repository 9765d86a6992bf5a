//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::commands;
use crate::commands::transcribe::OutputMode;
use crate::logging;

/// Transcribe an audio file into every Whisper response format
#[derive(Parser)]
#[command(name = "fanscribe")]
#[command(version)]
#[command(about = "Transcribe an audio file into every Whisper response format")]
#[command(
    long_about = "Sends one audio file to the OpenAI transcription API once per response \
format (json, text, srt, vtt, and verbose_json with word and segment timestamps) and \
writes each result to a file named after the input.\n\nDEFAULT COMMAND:\n    If no \
command is specified, 'transcribe' is used by default.\n\nEXAMPLES:\n    # Fan out to \
every format, files land in the working directory\n    $ fanscribe recording.mp3\n    \
\n    # Plain text only: transcription.txt plus stdout echo\n    $ fanscribe \
recording.mp3 --text\n    \n    # Write output files somewhere else\n    $ fanscribe \
recording.mp3 -d transcripts/\n    \n    # Use a different model\n    $ fanscribe \
recording.mp3 -m gpt-4o-mini-transcribe"
)]
#[command(
    after_help = "CONFIGURATION:\n    Credential:         OPENAI_API_KEY (environment or .env in the working directory)\n    Logs:               ~/.local/state/fanscribe/fanscribe.log.*"
)]
struct Cli {
    /// Audio file to transcribe (transcribe default command)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Request plain text only and write transcription.txt (transcribe default command)
    #[arg(short, long, global = true)]
    text: bool,

    /// Directory for output files, defaults to the working directory
    #[arg(short = 'd', long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Transcription model to request
    #[arg(short, long, value_name = "MODEL", global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file (default)
    ///
    /// Issues one API call per response format and writes one file per result.
    /// With --text, issues a single plain-text call instead.
    #[command(visible_alias = "t")]
    Transcribe {
        /// Path to the audio file to transcribe
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Request plain text only and write transcription.txt
        #[arg(short, long)]
        text: bool,

        /// Directory for output files, defaults to the working directory
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Transcription model to request
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If settings cannot be resolved (missing API key)
/// - If transcription or persistence fails
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Completions need neither logging nor settings
    if let Some(Commands::Completions { shell }) = &cli.command {
        generate(*shell, &mut Cli::command(), "fanscribe", &mut io::stdout());
        return Ok(());
    }

    logging::init_logging()?;

    // Merge top-level options with explicit transcribe command options.
    // If both are specified, the explicit transcribe command options take precedence.
    let (file, text, output_dir, model) = match cli.command {
        Some(Commands::Transcribe {
            file,
            text,
            output_dir,
            model,
        }) => (
            file,
            text || cli.text,
            output_dir.or(cli.output_dir),
            model.or(cli.model),
        ),
        None => {
            let file = match cli.file {
                Some(file) => file,
                None => {
                    Cli::command().print_help()?;
                    std::process::exit(2);
                }
            };
            (file, cli.text, cli.output_dir, cli.model)
        }
        Some(Commands::Completions { .. }) => unreachable!("handled earlier"),
    };

    let mode = if text {
        OutputMode::TextOnly
    } else {
        OutputMode::FanOut
    };

    commands::handle_transcribe(file, mode, output_dir, model).await
}
