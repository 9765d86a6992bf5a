//! Application command handlers for fanscribe.
//!
//! # Commands
//! - `transcribe`: fan an audio file out to every response format, or request
//!   plain text only, and persist the results

pub mod transcribe;

pub use transcribe::handle_transcribe;
