//! Synthesis client and its `SpeechSynthesizer` port implementation.

use async_trait::async_trait;
use solace_core::{SpeechSynthesizer, SynthesisError, SynthesisRequest, SynthesizedAudio};

use crate::config::TtsClientConfig;
use crate::error::{TtsError, TtsResult};
use crate::http::{HttpBackend, PostRequest, ReqwestBackend};
use crate::models::SpeechRequestBody;

/// Default synthesizer using the reqwest HTTP backend.
pub type ElevenLabsSynthesizer = TtsClient<ReqwestBackend>;

/// Client for an ElevenLabs-compatible text-to-speech API.
///
/// Generic over the HTTP backend for testing. Use [`ElevenLabsSynthesizer`]
/// in production code.
pub struct TtsClient<B: HttpBackend> {
    backend: B,
    config: TtsClientConfig,
}

impl ElevenLabsSynthesizer {
    /// Create a new synthesizer with the given configuration.
    pub fn new(config: TtsClientConfig) -> TtsResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self { backend, config })
    }
}

impl<B: HttpBackend> TtsClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: TtsClientConfig, backend: B) -> Self {
        Self { backend, config }
    }

    async fn request_speech(&self, request: &SynthesisRequest) -> TtsResult<SynthesizedAudio> {
        let api_key = self.config.api_key.clone().ok_or(TtsError::MissingApiKey)?;

        let body = SpeechRequestBody {
            text: &request.text,
            model_id: &self.config.model_id,
            voice_settings: (&request.settings).into(),
        };
        let body = serde_json::to_value(&body)?;

        let response = self
            .backend
            .post_json(PostRequest {
                url: self.config.speech_url(&request.voice_id),
                api_key,
                accept: "audio/mpeg",
                body,
            })
            .await?;

        if !response.is_success() {
            return Err(TtsError::from_status(response.status, &response.body));
        }

        if let Some(ct) = response.content_type.as_deref() {
            if ct.starts_with("application/json") || ct.starts_with("text/") {
                return Err(TtsError::UnexpectedContentType {
                    content_type: ct.to_string(),
                });
            }
        }

        if response.body.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        Ok(SynthesizedAudio {
            bytes: response.body,
            content_type: response.content_type,
        })
    }
}

#[async_trait]
impl<B: HttpBackend> SpeechSynthesizer for TtsClient<B> {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        match self.request_speech(request).await {
            Ok(audio) => {
                tracing::debug!(
                    voice = %request.voice_id,
                    bytes = audio.bytes.len(),
                    "Synthesized phrase"
                );
                Ok(audio)
            }
            Err(e) => {
                tracing::warn!(voice = %request.voice_id, error = %e, "Speech synthesis failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RawResponse;
    use crate::http::testing::FakeBackend;
    use solace_core::VoiceSettings;

    fn config() -> TtsClientConfig {
        TtsClientConfig::new()
            .with_base_url("http://tts.test")
            .with_api_key("key-abc")
    }

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            text: "Take a deep breath.".to_string(),
            voice_id: "EXAVITQu4vr4xnSDxMaL".to_string(),
            settings: VoiceSettings::default(),
        }
    }

    #[test]
    fn test_default_client_creation() {
        assert!(ElevenLabsSynthesizer::new(TtsClientConfig::new()).is_ok());
    }

    #[tokio::test]
    async fn test_success_returns_bytes_and_sends_expected_request() {
        let client = TtsClient::with_backend(config(), FakeBackend::audio(b"ID3audio"));

        let audio = client.synthesize(&request()).await.unwrap();
        assert_eq!(audio.bytes, b"ID3audio");
        assert_eq!(audio.content_type.as_deref(), Some("audio/mpeg"));

        let sent = client.backend.requests.lock().unwrap()[0].clone();
        assert_eq!(
            sent.url,
            "http://tts.test/v1/text-to-speech/EXAVITQu4vr4xnSDxMaL"
        );
        assert_eq!(sent.api_key, "key-abc");
        assert_eq!(sent.accept, "audio/mpeg");
        assert_eq!(sent.body["text"], "Take a deep breath.");
        assert_eq!(sent.body["model_id"], "eleven_turbo_v2_5");
        assert_eq!(sent.body["voice_settings"]["stability"], 0.5);
        assert_eq!(sent.body["voice_settings"]["similarity_boost"], 0.75);
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let client = TtsClient::with_backend(TtsClientConfig::new(), FakeBackend::audio(b"x"));

        let result = client.synthesize(&request()).await;
        assert!(matches!(result, Err(SynthesisError::MissingCredential)));
        assert_eq!(client.backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let client = TtsClient::with_backend(config(), FakeBackend::status(500, "boom"));

        match client.synthesize(&request()).await {
            Err(SynthesisError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected {other:?}"),
        }
        // No retry.
        assert_eq!(client.backend.request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_audio() {
        let client = TtsClient::with_backend(config(), FakeBackend::audio(b""));
        assert!(matches!(
            client.synthesize(&request()).await,
            Err(SynthesisError::EmptyAudio)
        ));
    }

    #[tokio::test]
    async fn test_json_on_success_is_decode_error() {
        let backend = FakeBackend::with_response(RawResponse {
            status: 200,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: br#"{"detail":"quota"}"#.to_vec(),
        });
        let client = TtsClient::with_backend(config(), backend);
        assert!(matches!(
            client.synthesize(&request()).await,
            Err(SynthesisError::Decode(_))
        ));
    }
}
