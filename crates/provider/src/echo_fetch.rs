//! Authenticated fetch for router-bound provider traffic.
//!
//! Every request gets `Authorization: Bearer <token>` from the token source,
//! replacing whatever the caller set. A `401` re-reads the token and retries
//! exactly once; the retry's response is final. A final `402` fires the
//! insufficient-funds callback and is still returned as a normal response.
//!
//! The wrapper holds no per-call state, so one instance can serve any number
//! of concurrent requests.

use async_trait::async_trait;
use echo_types::{
    Fetch, FetchInput, FetchRequest, FetchResponse, InsufficientFundsFn, Result, TokenFn,
};
use http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use std::{fmt, sync::Arc};

/// Value of [`Fetch::name`] for [`EchoFetch`].
pub const ECHO_FETCH_NAME: &str = "echo_fetch";

/// Wraps an inner [`Fetch`] with token injection, a single 401 retry and the
/// 402 side channel.
pub struct EchoFetch {
    inner: Arc<dyn Fetch>,
    token: TokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
}

impl EchoFetch {
    pub fn new(
        inner: Arc<dyn Fetch>,
        token: TokenFn,
        on_insufficient_funds: Option<InsufficientFundsFn>,
    ) -> Self {
        Self {
            inner,
            token,
            on_insufficient_funds,
        }
    }

    async fn send(&self, input: &FetchInput, token: Option<&str>) -> Result<FetchResponse> {
        let req = authorize(input, token)?;
        self.inner.fetch(req.into()).await
    }
}

/// Builds a fresh request from `input` with the caller's `Authorization`
/// headers dropped and the bearer token (if any) set.
///
/// A token that is not a valid header value is treated like a missing one:
/// the request goes out unauthenticated and the router answers `401`.
fn authorize(input: &FetchInput, token: Option<&str>) -> Result<FetchRequest> {
    let mut req = input.to_request()?;
    let headers = req.headers_mut();
    headers.remove(AUTHORIZATION);
    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("access token is not a valid header value, sending without it");
            }
        }
    }
    Ok(req)
}

#[async_trait]
impl Fetch for EchoFetch {
    async fn fetch(&self, input: FetchInput) -> Result<FetchResponse> {
        let token = (self.token)().await;
        let mut response = self.send(&input, token.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("request unauthorized, re-reading token and retrying once");
            let token = (self.token)().await;
            response = self.send(&input, token.as_deref()).await?;
        }

        if response.status() == StatusCode::PAYMENT_REQUIRED {
            tracing::warn!("request rejected for insufficient funds");
            if let Some(callback) = &self.on_insufficient_funds {
                callback();
            }
        }

        Ok(response)
    }

    fn name(&self) -> &'static str {
        ECHO_FETCH_NAME
    }
}

impl fmt::Debug for EchoFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoFetch")
            .field("inner", &self.inner.name())
            .field("on_insufficient_funds", &self.on_insufficient_funds.is_some())
            .finish_non_exhaustive()
    }
}
