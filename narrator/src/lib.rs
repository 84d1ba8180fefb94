//! Narrator - pre-render narration clips through a text-to-speech API.
//!
//! A [`BatchRunner`](runner::BatchRunner) walks an ordered list of
//! [`NarrationItem`](narration::NarrationItem)s, asks a
//! [`TextToSpeechProvider`](audio::TextToSpeechProvider) for each clip whose
//! file is missing, and writes the returned audio to `<dir>/<key>.<ext>`.
//! Existing files are never requested again, so a batch can be interrupted
//! and re-run at any point.

pub mod audio;
pub mod error;
pub mod narration;
pub mod prelude;
pub mod providers;
pub mod runner;

pub use error::{Error, Result, TtsError};
