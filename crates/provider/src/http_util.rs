//! The real network fetch, backed by `reqwest`.

use async_trait::async_trait;
use echo_types::{EchoError, Fetch, FetchInput, FetchResponse, Result};
use http::Response;

/// [`Fetch`] over a shared `reqwest` client. Buffers the whole body.
#[derive(Debug, Clone, Default)]
pub struct HttpFetch {
    http: reqwest::Client,
}

impl HttpFetch {
    /// Creates a fetch wrapping the given HTTP client.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn fetch(&self, input: FetchInput) -> Result<FetchResponse> {
        let req = reqwest::Request::try_from(input.into_request()?)
            .map_err(|e| EchoError::InvalidRequest(e.to_string()))?;
        let method = req.method().clone();
        let url = req.url().clone();

        let resp = self
            .http
            .execute(req)
            .await
            .map_err(|e| EchoError::Transport(e.to_string()))?;
        let status = resp.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "fetch");

        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| EchoError::Transport(e.to_string()))?;

        let mut out = Response::builder()
            .status(status)
            .version(version)
            .body(body)?;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct() -> HttpFetch {
        HttpFetch::new(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn test_http_fetch_clone() {
        let fetch = HttpFetch::new(reqwest::Client::new());
        let _fetch2 = fetch.clone();
        assert_eq!(fetch.name(), "fetch");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = direct()
            .fetch(FetchInput::get(format!("http://{addr}/")))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_bad_url_is_not_transport_error() {
        let err = HttpFetch::default()
            .fetch(FetchInput::get("/relative/path"))
            .await
            .unwrap_err();
        assert!(matches!(err, EchoError::InvalidRequest(_)));
    }
}
