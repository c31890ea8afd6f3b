//! Provider identifiers and their per-provider wire details.

use echo_types::{EchoError, Result};
use http::{HeaderMap, HeaderName, HeaderValue, header::AUTHORIZATION};
use std::fmt;

/// Required Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Identifies an LLM provider reachable through the echo router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
    Groq,
    OpenRouter,
    /// xAI, spoken to through its OpenAI-compatible API.
    Xai,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = EchoError;

    /// Parse a provider name or well-known alias into a [`ProviderKind`].
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Config`] if the string names no known provider.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            "groq" => Ok(Self::Groq),
            "openrouter" => Ok(Self::OpenRouter),
            "xai" | "grok" => Ok(Self::Xai),
            other => Err(EchoError::Config(format!("unknown provider: {other}"))),
        }
    }
}

impl ProviderKind {
    /// Returns all known provider variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::OpenAi,
            Self::Anthropic,
            Self::Google,
            Self::Groq,
            Self::OpenRouter,
            Self::Xai,
        ]
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Groq => "groq",
            Self::OpenRouter => "openrouter",
            Self::Xai => "xai",
        }
    }

    /// Name of the factory building this provider, used to label errors.
    #[must_use]
    pub fn factory_name(self) -> &'static str {
        match self {
            Self::OpenAi => "create_echo_openai",
            Self::Anthropic => "create_echo_anthropic",
            Self::Google => "create_echo_google",
            Self::Groq => "create_echo_groq",
            Self::OpenRouter => "create_echo_openrouter",
            Self::Xai => "create_echo_xai",
        }
    }

    /// `true` for providers speaking the OpenAI chat-completions dialect.
    #[must_use]
    pub fn is_openai_compatible(self) -> bool {
        !matches!(self, Self::Anthropic | Self::Google)
    }

    /// Path (relative to the base URL) of the chat endpoint for `model`.
    #[must_use]
    pub fn chat_path(self, model: &str) -> String {
        if self.is_openai_compatible() {
            return "/chat/completions".to_string();
        }
        match self {
            Self::Google => format!("/v1beta/models/{model}:generateContent"),
            _ => "/v1/messages".to_string(),
        }
    }

    /// Headers each provider's own SDK would send with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::InvalidRequest`] if `api_key` is not a valid header value.
    pub fn auth_headers(self, api_key: &str) -> Result<HeaderMap> {
        let value = |v: &str| {
            HeaderValue::from_str(v).map_err(|_| {
                EchoError::InvalidRequest("api key is not a valid header value".into())
            })
        };
        let mut headers = HeaderMap::new();
        if self.is_openai_compatible() {
            headers.insert(AUTHORIZATION, value(&format!("Bearer {api_key}"))?);
            return Ok(headers);
        }
        match self {
            Self::Anthropic => {
                headers.insert(HeaderName::from_static("x-api-key"), value(api_key)?);
                headers.insert(
                    HeaderName::from_static("anthropic-version"),
                    HeaderValue::from_static(ANTHROPIC_VERSION),
                );
            }
            _ => {
                headers.insert(HeaderName::from_static("x-goog-api-key"), value(api_key)?);
            }
        }
        Ok(headers)
    }
}
