//! Audio types and the speech provider trait.
//!
//! A [`SpeechRequest`] describes one clip to synthesize: which model and
//! voice to use, the transcript, and the [`OutputFormat`] of the returned
//! bytes. Providers implement [`TextToSpeechProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use narrator::prelude::*;
//!
//! let request = SpeechRequest::new("sonic-2", "Hello, world!", "my-voice-id")
//!     .format(OutputFormat::mp3(44_100));
//! let response = provider.speech(&request).await?;
//! response.save("hello.mp3").await?;
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};

/// Container of the generated audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioContainer {
    /// MP3 file.
    #[default]
    Mp3,
    /// WAV file.
    Wav,
    /// Headerless sample stream.
    Raw,
}

impl AudioContainer {
    /// Get the file extension for this container.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Raw => "pcm",
        }
    }
}

/// Sample encoding inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioEncoding {
    /// MPEG layer III.
    #[default]
    Mp3,
    /// 32-bit float little-endian PCM.
    PcmF32le,
    /// 16-bit signed little-endian PCM.
    PcmS16le,
    /// G.711 mu-law.
    PcmMulaw,
    /// G.711 A-law.
    PcmAlaw,
}

/// Output encoding descriptor sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputFormat {
    /// File container.
    pub container: AudioContainer,
    /// Sample encoding.
    pub encoding: AudioEncoding,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl OutputFormat {
    /// Default sample rate in Hz.
    pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

    /// MP3 output at the given sample rate.
    #[must_use]
    pub const fn mp3(sample_rate: u32) -> Self {
        Self {
            container: AudioContainer::Mp3,
            encoding: AudioEncoding::Mp3,
            sample_rate,
        }
    }

    /// WAV output with the given PCM encoding.
    #[must_use]
    pub const fn wav(encoding: AudioEncoding, sample_rate: u32) -> Self {
        Self {
            container: AudioContainer::Wav,
            encoding,
            sample_rate,
        }
    }

    /// File extension for artifacts in this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        self.container.extension()
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::mp3(Self::DEFAULT_SAMPLE_RATE)
    }
}

/// Voice reference for text-to-speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Voice identifier.
    pub id: String,
}

impl Voice {
    /// Create a new voice with the given ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl<S: Into<String>> From<S> for Voice {
    fn from(s: S) -> Self {
        Self::new(s)
    }
}

/// Request for generating speech from text.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    /// Model to use for synthesis (e.g., "sonic-2").
    pub model: String,
    /// Text to convert to speech.
    pub transcript: String,
    /// Voice to use.
    pub voice: Voice,
    /// Output audio format.
    pub format: OutputFormat,
}

impl SpeechRequest {
    /// Create a new speech request with the default output format.
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        transcript: impl Into<String>,
        voice: impl Into<Voice>,
    ) -> Self {
        Self {
            model: model.into(),
            transcript: transcript.into(),
            voice: voice.into(),
            format: OutputFormat::default(),
        }
    }

    /// Set the output format.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Response from a speech synthesis request.
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// The generated audio data, exactly as returned by the provider.
    pub audio: Vec<u8>,
    /// The format of the audio data.
    pub format: OutputFormat,
}

impl SpeechResponse {
    /// Create a new speech response.
    #[must_use]
    pub const fn new(audio: Vec<u8>, format: OutputFormat) -> Self {
        Self { audio, format }
    }

    /// Save the audio to `path`, replacing it in one step.
    ///
    /// The bytes go to a sibling `<name>.part` file first, which is then
    /// renamed over `path`, so an interrupted write never leaves a
    /// truncated file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be written or renamed.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let partial = partial_path(path);

        if let Err(e) = tokio::fs::write(&partial, &self.audio).await {
            return Err(Error::write(path, e));
        }
        if let Err(e) = tokio::fs::rename(&partial, path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::debug!(
                    path = %partial.display(),
                    error = %cleanup,
                    "could not remove partial file"
                );
            }
            return Err(Error::write(path, e));
        }
        Ok(())
    }

    /// Size of the audio in kilobytes, rounded to the nearest whole number.
    #[must_use]
    pub fn size_kb(&self) -> u64 {
        kilobytes(self.audio.len() as u64)
    }
}

/// Sibling path used while an artifact is being written.
fn partial_path(path: &Path) -> PathBuf {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    PathBuf::from(partial)
}

/// Rounds a byte count to whole kilobytes.
#[must_use]
pub const fn kilobytes(bytes: u64) -> u64 {
    (bytes + 512) / 1024
}

/// Trait for providers that support text-to-speech synthesis.
///
/// One call is one outbound request; implementations must not retry.
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Provider name used in logs (e.g., "cartesia").
    fn name(&self) -> &str;

    /// Generate speech from text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TtsError::HttpStatus`] when the provider rejects the
    /// request, or a network error when it cannot be reached.
    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse>;
}

#[async_trait]
impl<P: TextToSpeechProvider + ?Sized> TextToSpeechProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        (**self).speech(request).await
    }
}
