//! Public configuration for the synthesis client.

use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "SOLACE_TTS_BASE_URL";
/// Environment variable overriding the synthesis model.
pub const MODEL_ENV: &str = "SOLACE_TTS_MODEL";

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_MODEL: &str = "eleven_turbo_v2_5";

/// Configuration for the synthesis client.
///
/// # Example
///
/// ```
/// use solace_tts::TtsClientConfig;
/// use std::time::Duration;
///
/// let config = TtsClientConfig::new()
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(20));
/// ```
#[derive(Debug, Clone)]
pub struct TtsClientConfig {
    /// API base URL, without the `/v1/...` path
    pub(crate) base_url: String,
    /// Synthesis model id sent with every request
    pub(crate) model_id: String,
    /// API key; requests fail with `MissingCredential` without one
    pub(crate) api_key: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Transport timeout for a single request
    pub(crate) timeout: Duration,
}

impl Default for TtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL.to_string(),
            api_key: None,
            user_agent: concat!("solace-tts/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl TtsClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new().with_optional_api_key(get(API_KEY_ENV));
        if let Some(url) = get(BASE_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(model) = get(MODEL_ENV) {
            config = config.with_model(model);
        }
        config
    }

    /// Set the API base URL. Defaults to `https://api.elevenlabs.io`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the synthesis model id. Defaults to `eleven_turbo_v2_5`.
    #[must_use]
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout. Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is configured.
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full endpoint URL for a synthesis voice.
    pub(crate) fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{voice_id}",
            self.base_url.trim_end_matches('/')
        )
    }
}
