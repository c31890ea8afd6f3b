//! Shared request path for control-plane resources.
//!
//! [`ResourceClient::execute`] raises raw errors (`EchoError::Http` for
//! non-success statuses, transport errors unchanged); [`ResourceClient::request`]
//! classifies them once through [`parse_echo_error`].

use crate::error::{ApiError, parse_echo_error};
use bytes::Bytes;
use echo_types::{
    EchoError, Fetch, FetchInput, FetchResponse, RequestInit, Result, TokenProvider,
};
use http::{
    HeaderMap, HeaderValue, Method, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// Authenticated JSON client for one control-plane base URL.
#[derive(Clone)]
pub struct ResourceClient {
    base_url: String,
    fetch: Arc<dyn Fetch>,
    tokens: Arc<dyn TokenProvider>,
}

impl ResourceClient {
    pub fn new(
        base_url: impl Into<String>,
        fetch: Arc<dyn Fetch>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetch,
            tokens,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn input(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Bytes>,
        token: Option<&str>,
    ) -> Result<FetchInput> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                EchoError::Auth("access token contains characters not allowed in a header".into())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(FetchInput::with_init(
            format!("{}{path}", self.base_url),
            RequestInit {
                method: method.clone(),
                headers,
                body: body.cloned(),
            },
        ))
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Bytes>,
    ) -> Result<FetchResponse> {
        let token = self.tokens.get_access_token().await;
        self.fetch
            .fetch(self.input(method, path, body, token.as_deref())?)
            .await
    }

    /// Sends one request and returns the body of a successful response.
    ///
    /// A `401` triggers one token refresh and one retry. If the refresh
    /// fails, the token provider is told and the `401` is reported.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Http`] (`"HTTP <status>: <body>"`) for non-success
    /// statuses; transport errors propagate unchanged.
    pub async fn execute(&self, method: Method, path: &str, body: Option<Bytes>) -> Result<Bytes> {
        let mut resp = self.send(&method, path, body.as_ref()).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            match self.tokens.refresh_token().await {
                Ok(_) => {
                    tracing::debug!(endpoint = path, "unauthorized, retrying with refreshed token");
                    resp = self.send(&method, path, body.as_ref()).await?;
                }
                Err(e) => {
                    tracing::warn!(endpoint = path, error = %e, "token refresh failed");
                    self.tokens.on_refresh_error(&e);
                }
            }
        }

        let status = resp.status();
        if !status.is_success() {
            let body = String::from_utf8_lossy(resp.body()).into_owned();
            tracing::debug!(
                endpoint = path,
                status = status.as_u16(),
                "control-plane request failed"
            );
            return Err(EchoError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.into_body())
    }

    /// Sends a request and decodes the JSON response, classifying failures.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] built by [`parse_echo_error`].
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_raw(method, path, body)
            .await
            .map_err(|e| parse_echo_error(&e, Some(path)))
    }

    async fn request_raw<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(|b| serde_json::to_vec(b).map(Bytes::from))
            .transpose()?;
        let bytes = self.execute(method, path, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `GET path`, decoded as JSON.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body, decoded as JSON.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::request`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }
}
