//! Mock speech provider for testing.
//!
//! Returns scripted replies keyed by transcript and records every request,
//! so tests can assert exactly which clips were requested and in what order.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::audio::{SpeechRequest, SpeechResponse, TextToSpeechProvider};
use crate::error::{Result, TtsError};

/// Scripted reply for one transcript.
#[derive(Debug, Clone)]
enum Reply {
    Audio(Vec<u8>),
    Status(u16, String),
}

/// A mock speech provider.
///
/// Transcripts without a scripted reply get their own UTF-8 bytes back as
/// audio.
///
/// # Example
///
/// ```rust,ignore
/// use narrator::prelude::*;
///
/// let mock = MockSpeech::new()
///     .respond("hi", b"P_a".to_vec())
///     .fail("bye", 500, "boom");
/// ```
#[derive(Debug, Default)]
pub struct MockSpeech {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<SpeechRequest>>,
}

impl MockSpeech {
    /// Create a mock that echoes each transcript back as audio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `audio` for requests with this transcript.
    #[must_use]
    pub fn respond(mut self, transcript: impl Into<String>, audio: Vec<u8>) -> Self {
        self.replies.insert(transcript.into(), Reply::Audio(audio));
        self
    }

    /// Reject requests with this transcript with the given status and body.
    #[must_use]
    pub fn fail(
        mut self,
        transcript: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.replies
            .insert(transcript.into(), Reply::Status(status, body.into()));
        self
    }

    /// Transcripts requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock_calls()
            .iter()
            .map(|req| req.transcript.clone())
            .collect()
    }

    /// Full requests received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.lock_calls().clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<SpeechRequest>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl TextToSpeechProvider for MockSpeech {
    fn name(&self) -> &str {
        "mock"
    }

    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        self.lock_calls().push(request.clone());

        match self.replies.get(&request.transcript) {
            Some(Reply::Audio(audio)) => Ok(SpeechResponse::new(audio.clone(), request.format)),
            Some(Reply::Status(status, body)) => {
                Err(TtsError::http_status(*status, body.clone()).into())
            }
            None => Ok(SpeechResponse::new(
                request.transcript.as_bytes().to_vec(),
                request.format,
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_echoes_unscripted_transcripts() {
        let mock = MockSpeech::new();
        let response = mock
            .speech(&SpeechRequest::new("m", "echo me", "v"))
            .await
            .unwrap();
        assert_eq!(response.audio, b"echo me");
    }

    #[tokio::test]
    async fn test_mock_scripted_replies_and_call_log() {
        let mock = MockSpeech::new()
            .respond("hi", vec![1, 2, 3])
            .fail("bye", 500, "boom");

        let ok = mock.speech(&SpeechRequest::new("m", "hi", "v")).await.unwrap();
        assert_eq!(ok.audio, vec![1, 2, 3]);

        let err = mock
            .speech(&SpeechRequest::new("m", "bye", "v"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Tts(TtsError::HttpStatus { status: 500, .. })
        ));

        assert_eq!(mock.calls(), vec!["hi".to_owned(), "bye".to_owned()]);
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[0].model, "m");
    }
}
