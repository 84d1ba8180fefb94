//! Cartesia byte-synthesis endpoint (`POST /tts/bytes`).

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::audio::{OutputFormat, SpeechRequest, SpeechResponse, TextToSpeechProvider};
use crate::error::{Result, TtsError};

use super::client::Cartesia;

/// Cartesia text-to-speech request body.
#[derive(Debug, Clone, Serialize)]
struct CartesiaSpeechRequest<'a> {
    model_id: &'a str,
    transcript: &'a str,
    voice: CartesiaVoice<'a>,
    output_format: &'a OutputFormat,
}

/// Voice selector; only id-based selection is used.
#[derive(Debug, Clone, Serialize)]
struct CartesiaVoice<'a> {
    mode: &'static str,
    id: &'a str,
}

impl<'a> CartesiaSpeechRequest<'a> {
    fn from_request(request: &'a SpeechRequest) -> Self {
        Self {
            model_id: &request.model,
            transcript: &request.transcript,
            voice: CartesiaVoice {
                mode: "id",
                id: &request.voice.id,
            },
            output_format: &request.format,
        }
    }
}

#[async_trait]
impl TextToSpeechProvider for Cartesia {
    fn name(&self) -> &str {
        Self::PROVIDER
    }

    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let url = self.bytes_url();
        let body = CartesiaSpeechRequest::from_request(request);

        tracing::debug!(
            model = %request.model,
            voice = %request.voice.id,
            chars = request.transcript.len(),
            "sending synthesis request"
        );

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(TtsError::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let audio = response.bytes().await.map_err(TtsError::from)?.to_vec();

        Ok(SpeechResponse::new(audio, request.format))
    }
}
