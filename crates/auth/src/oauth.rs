//! OAuth token provider assembled from caller-owned closures.
//!
//! The embedding application keeps its own token storage (a login session,
//! keychain, UI auth context); the SDK only sees three callbacks.

use async_trait::async_trait;
use echo_types::{EchoError, RefreshErrorFn, Result, TokenFn, TokenProvider};
use futures_util::{FutureExt as _, future::BoxFuture};
use std::{fmt, future::Future, sync::Arc};

type RefreshFn = Arc<dyn Fn() -> BoxFuture<'static, Result<Option<String>>> + Send + Sync>;

/// A [`TokenProvider`] that delegates to `get` / `refresh` closures.
pub struct OAuthTokenProvider {
    get: TokenFn,
    refresh: RefreshFn,
    on_refresh_error: Option<RefreshErrorFn>,
}

impl OAuthTokenProvider {
    /// Builds a provider from the host application's token accessors.
    ///
    /// `get` must return a usable token: when the stored one has expired it
    /// refreshes before answering. The router retry on `401` only calls `get`
    /// again, so a `get` that keeps handing back an expired token makes that
    /// retry fail the same way.
    pub fn new<G, GF, R, RF>(get: G, refresh: R) -> Self
    where
        G: Fn() -> GF + Send + Sync + 'static,
        GF: Future<Output = Option<String>> + Send + 'static,
        R: Fn() -> RF + Send + Sync + 'static,
        RF: Future<Output = Result<Option<String>>> + Send + 'static,
    {
        Self {
            get: Arc::new(move || get().boxed()),
            refresh: Arc::new(move || refresh().boxed()),
            on_refresh_error: None,
        }
    }

    /// Registers a hook called with every refresh failure.
    #[must_use]
    pub fn with_refresh_error_hook(
        mut self,
        hook: impl Fn(&EchoError) + Send + Sync + 'static,
    ) -> Self {
        self.on_refresh_error = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for OAuthTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokenProvider")
            .field("on_refresh_error", &self.on_refresh_error.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn get_access_token(&self) -> Option<String> {
        (self.get)().await
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        (self.refresh)().await
    }

    fn on_refresh_error(&self, error: &EchoError) {
        if let Some(hook) = &self.on_refresh_error {
            hook(error);
        }
    }
}
