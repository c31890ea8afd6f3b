//! In-memory [`Fetch`] used by the unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use echo_types::{EchoError, Fetch, FetchInput, FetchRequest, FetchResponse, Result};
use http::{Response, header::AUTHORIZATION};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

type Responder = Box<dyn Fn(&FetchRequest) -> Result<u16> + Send + Sync>;

/// Records every request and answers with scripted statuses.
pub(crate) struct ScriptedFetch {
    responder: Responder,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetch {
    /// Answers with `statuses` in order, then `200` once they run out.
    pub(crate) fn with_statuses(statuses: impl IntoIterator<Item = u16>) -> Arc<Self> {
        let queue = Mutex::new(statuses.into_iter().collect::<VecDeque<_>>());
        Self::responding(move |_| Ok(queue.lock().unwrap().pop_front().unwrap_or(200)))
    }

    /// Fails every request with a transport error.
    pub(crate) fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::responding(move |_| Err(EchoError::Transport(message.clone())))
    }

    pub(crate) fn responding(
        responder: impl Fn(&FetchRequest) -> Result<u16> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Copies of the requests seen so far.
    pub(crate) fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().iter().map(clone_request).collect()
    }
}

fn clone_request(req: &FetchRequest) -> FetchRequest {
    let mut out = http::Request::builder()
        .method(req.method().clone())
        .uri(req.uri().clone())
        .body(req.body().clone())
        .unwrap();
    *out.headers_mut() = req.headers().clone();
    out
}

#[async_trait]
impl Fetch for ScriptedFetch {
    async fn fetch(&self, input: FetchInput) -> Result<FetchResponse> {
        let req = input.into_request()?;
        let outcome = (self.responder)(&req);
        self.requests.lock().unwrap().push(req);
        let status = outcome?;
        Ok(Response::builder()
            .status(status)
            .body(Bytes::from(format!("status {status}")))
            .unwrap())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// The bearer token carried by `req`, if any.
pub(crate) fn bearer(req: &FetchRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
