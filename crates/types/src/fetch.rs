//! The fetch primitive: request input shapes, the [`Fetch`] trait, and the
//! callback aliases used to wire tokens and billing signals into it.

use crate::{EchoError, error::Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::BoxFuture;
use http::{HeaderMap, Method, Request, Response};
use std::sync::Arc;

/// A fully built outgoing request.
pub type FetchRequest = Request<Bytes>;

/// A buffered response.
pub type FetchResponse = Response<Bytes>;

/// Zero-argument token source: resolves to the current bearer token, if any.
pub type TokenFn = Arc<dyn Fn() -> BoxFuture<'static, Option<String>> + Send + Sync>;

/// Token source keyed by app id, as supplied by the embedding application.
pub type AppTokenFn = Arc<dyn Fn(&str) -> BoxFuture<'static, Option<String>> + Send + Sync>;

/// Invoked when the router rejects a request with `402 Payment Required`.
pub type InsufficientFundsFn = Arc<dyn Fn() + Send + Sync>;

/// Invoked when a token refresh fails.
pub type RefreshErrorFn = Arc<dyn Fn(&EchoError) + Send + Sync>;

/// Method, headers and body for a URL-addressed request.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// What a caller hands to [`Fetch::fetch`]: either a URL plus init, or a
/// pre-built request.
#[derive(Debug)]
pub enum FetchInput {
    Url { url: String, init: RequestInit },
    Request(FetchRequest),
}

impl FetchInput {
    /// A `GET` for `url` with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            init: RequestInit::default(),
        }
    }

    /// A URL-addressed request with explicit init.
    pub fn with_init(url: impl Into<String>, init: RequestInit) -> Self {
        Self::Url {
            url: url.into(),
            init,
        }
    }

    /// Builds a new request from this input, leaving the input untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::InvalidRequest`] if the URL cannot be parsed.
    pub fn to_request(&self) -> Result<FetchRequest> {
        match self {
            Self::Url { url, init } => {
                let mut req = Request::builder()
                    .method(init.method.clone())
                    .uri(url.as_str())
                    .body(init.body.clone().unwrap_or_default())?;
                *req.headers_mut() = init.headers.clone();
                Ok(req)
            }
            Self::Request(src) => {
                let mut req = Request::builder()
                    .method(src.method().clone())
                    .uri(src.uri().clone())
                    .version(src.version())
                    .body(src.body().clone())?;
                *req.headers_mut() = src.headers().clone();
                Ok(req)
            }
        }
    }

    /// Converts into a request, reusing a pre-built one as is.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::InvalidRequest`] if the URL cannot be parsed.
    pub fn into_request(self) -> Result<FetchRequest> {
        match self {
            Self::Request(req) => Ok(req),
            url @ Self::Url { .. } => url.to_request(),
        }
    }
}

impl From<FetchRequest> for FetchInput {
    fn from(req: FetchRequest) -> Self {
        Self::Request(req)
    }
}

/// Sends one request and buffers the response.
///
/// Implementations return `Err` only when no response exists (transport
/// failure, unbuildable request); every HTTP status is an `Ok` response.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, input: FetchInput) -> Result<FetchResponse>;

    /// Identifies the implementation; wrappers override this so clients can
    /// check which fetch they were given.
    fn name(&self) -> &'static str {
        "fetch"
    }
}
