//! Thin provider client whose only network path is an injected [`Fetch`].

use crate::{http_util::HttpFetch, registry::ProviderKind};
use bytes::Bytes;
use echo_types::{Fetch, FetchInput, FetchResponse, RequestInit, Result};
use http::{HeaderMap, HeaderValue, Method, header::CONTENT_TYPE};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Construction options, shaped like the options object third-party provider
/// SDKs accept.
#[derive(Default)]
pub struct ClientOptions {
    pub base_url: String,
    pub api_key: String,
    /// Network layer. A plain [`HttpFetch`] is installed when unset.
    pub fetch: Option<Arc<dyn Fetch>>,
    /// Sent with every request, before provider auth headers.
    pub default_headers: HeaderMap,
}

/// A client for one provider, routed through `base_url`.
pub struct ProviderClient {
    kind: ProviderKind,
    base_url: String,
    api_key: String,
    fetch: Arc<dyn Fetch>,
    default_headers: HeaderMap,
}

impl ProviderClient {
    #[must_use]
    pub fn new(kind: ProviderKind, options: ClientOptions) -> Self {
        Self {
            kind,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key,
            fetch: options
                .fetch
                .unwrap_or_else(|| Arc::new(HttpFetch::default())),
            default_headers: options.default_headers,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the installed fetch (see [`Fetch::name`]).
    #[must_use]
    pub fn fetch_name(&self) -> &'static str {
        self.fetch.name()
    }

    /// Sends `body` (as JSON, when present) to `path` under the base URL.
    ///
    /// Returns the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport fails.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<FetchResponse> {
        let mut headers = self.default_headers.clone();
        headers.extend(self.kind.auth_headers(&self.api_key)?);
        let body = match body {
            Some(json) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(Bytes::from(serde_json::to_vec(json)?))
            }
            None => None,
        };

        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let input = FetchInput::with_init(
            url,
            RequestInit {
                method,
                headers,
                body,
            },
        );
        self.fetch.fetch(input).await
    }

    /// Posts a chat request for `model`.
    ///
    /// For every provider except Google (which carries the model in the path)
    /// a missing `"model"` field is filled in from `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport fails.
    pub async fn chat(&self, model: &str, body: &Value) -> Result<FetchResponse> {
        let mut body = body.clone();
        if self.kind != ProviderKind::Google
            && let Some(obj) = body.as_object_mut()
        {
            obj.entry("model")
                .or_insert_with(|| Value::String(model.to_string()));
        }
        self.send(Method::POST, &self.kind.chat_path(model), Some(&body))
            .await
    }
}

impl fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClient")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("fetch", &self.fetch.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedFetch, bearer};
    use http::header::AUTHORIZATION;
    use serde_json::json;

    fn client(kind: ProviderKind, fetch: Arc<ScriptedFetch>) -> ProviderClient {
        ProviderClient::new(
            kind,
            ClientOptions {
                base_url: "https://router.test/".into(),
                api_key: "sk-placeholder".into(),
                fetch: Some(fetch),
                default_headers: HeaderMap::new(),
            },
        )
    }

    #[test]
    fn test_default_fetch() {
        let c = ProviderClient::new(ProviderKind::OpenAi, ClientOptions::default());
        assert_eq!(c.fetch_name(), "fetch");
    }

    #[tokio::test]
    async fn test_chat_openai_compatible() {
        let fetch = ScriptedFetch::with_statuses([200]);
        let c = client(ProviderKind::Groq, fetch.clone());
        let resp = c
            .chat("llama-3.3-70b", &json!({"messages": []}))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let req = &fetch.requests()[0];
        assert_eq!(req.uri(), "https://router.test/chat/completions");
        assert_eq!(req.method(), Method::POST);
        assert_eq!(bearer(req).as_deref(), Some("sk-placeholder"));
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        let sent: Value = serde_json::from_slice(req.body()).unwrap();
        assert_eq!(sent["model"], "llama-3.3-70b");
    }

    #[tokio::test]
    async fn test_chat_keeps_explicit_model() {
        let fetch = ScriptedFetch::with_statuses([200]);
        let c = client(ProviderKind::OpenAi, fetch.clone());
        c.chat("gpt-4o", &json!({"model": "gpt-4o-mini"}))
            .await
            .unwrap();
        let sent: Value = serde_json::from_slice(fetch.requests()[0].body()).unwrap();
        assert_eq!(sent["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_chat_google_model_in_path() {
        let fetch = ScriptedFetch::with_statuses([200]);
        let c = client(ProviderKind::Google, fetch.clone());
        c.chat("gemini-2.0-flash", &json!({"contents": []}))
            .await
            .unwrap();
        let req = &fetch.requests()[0];
        assert_eq!(
            req.uri(),
            "https://router.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(req.headers()["x-goog-api-key"], "sk-placeholder");
        let sent: Value = serde_json::from_slice(req.body()).unwrap();
        assert!(sent.get("model").is_none());
    }

    #[tokio::test]
    async fn test_send_without_body() {
        let fetch = ScriptedFetch::with_statuses([200]);
        let mut default_headers = HeaderMap::new();
        default_headers.insert("x-title", HeaderValue::from_static("echo"));
        let c = ProviderClient::new(
            ProviderKind::Anthropic,
            ClientOptions {
                base_url: "https://router.test".into(),
                api_key: "k".into(),
                fetch: Some(fetch.clone()),
                default_headers,
            },
        );
        c.send(Method::GET, "v1/models", None).await.unwrap();
        let req = &fetch.requests()[0];
        assert_eq!(req.uri(), "https://router.test/v1/models");
        assert_eq!(req.headers()["x-title"], "echo");
        assert_eq!(req.headers()["x-api-key"], "k");
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert!(req.body().is_empty());
    }
}
