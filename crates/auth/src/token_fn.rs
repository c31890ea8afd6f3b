//! Adapters from [`TokenProvider`]s to the plain token callbacks that
//! [`echo_types::Fetch`] wrappers consume.

use echo_types::{AppTokenFn, TokenFn, TokenProvider};
use futures_util::FutureExt as _;
use std::sync::Arc;

/// Reads the provider's current token; when there is none, refreshes once and
/// reads again. Refresh failures go to [`TokenProvider::on_refresh_error`] and
/// yield `None`.
pub async fn current_or_refresh(provider: &dyn TokenProvider) -> Option<String> {
    if let Some(token) = provider.get_access_token().await {
        return Some(token);
    }
    match provider.refresh_token().await {
        Ok(_) => provider.get_access_token().await,
        Err(e) => {
            tracing::warn!(error = %e, "token refresh failed");
            provider.on_refresh_error(&e);
            None
        }
    }
}

/// Wraps a provider as an app-keyed token source. The app id is ignored: a
/// provider already belongs to one app.
///
/// `refresh_token` is only reached when the provider has no token at all.
/// Expiry is the provider's concern: its `get_access_token` must refresh a
/// stale token itself, since a `401` retry just asks this source again.
pub fn for_app(provider: Arc<dyn TokenProvider>) -> AppTokenFn {
    Arc::new(move |_app_id: &str| {
        let provider = Arc::clone(&provider);
        async move { current_or_refresh(provider.as_ref()).await }.boxed()
    })
}

/// Fixes the app id of an app-keyed token source.
pub fn bind_app(get_token: AppTokenFn, app_id: impl Into<String>) -> TokenFn {
    let app_id: String = app_id.into();
    Arc::new(move || get_token(&app_id))
}
