//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use narrator::prelude::*;
//! ```

pub use crate::audio::{
    AudioContainer, AudioEncoding, OutputFormat, SpeechRequest, SpeechResponse,
    TextToSpeechProvider, Voice,
};
pub use crate::error::{Error, Result, TtsError};
pub use crate::narration::{NarrationItem, beacon_narrations, validate_batch};
pub use crate::providers::{Cartesia, CartesiaConfig, MockSpeech};
pub use crate::runner::{BatchRunner, ItemOutcome, RunReport, RunnerConfig};
