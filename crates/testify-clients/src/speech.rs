//! ElevenLabs text-to-speech.

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;

use crate::{AudioStream, ClientError, SpeechSynthesizer, status_error};

pub const DEFAULT_ELEVENLABS_API: &str = "https://api.elevenlabs.io/v1";

/// Fixed narrator voice ("Rachel").
pub const VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const MODEL_ID: &str = "eleven_monolingual_v1";
const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.75;

pub struct ElevenLabsSpeech {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsSpeech {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn synthesis_url(&self) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            VOICE_ID
        )
    }

    /// No whole-request timeout: the body is relayed as it streams, so only
    /// the client's read timeout applies.
    fn synthesis_request(&self, text: &str) -> RequestBuilder {
        self.client
            .post(self.synthesis_url())
            .header("xi-api-key", &self.api_key)
            .header(header::ACCEPT, "audio/mpeg")
            .json(&SpeechRequest {
                text,
                model_id: MODEL_ID,
                voice_settings: VoiceSettings {
                    stability: STABILITY,
                    similarity_boost: SIMILARITY_BOOST,
                },
            })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str) -> Result<AudioStream, ClientError> {
        let response = self.synthesis_request(text).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(response.bytes_stream().map_err(ClientError::from).boxed())
    }
}
