//! Async traits shared across all echo crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `echo-types`, not on each other.

use crate::{EchoError, error::Result};
use async_trait::async_trait;

pub use crate::fetch::Fetch;

/// Supplies bearer tokens to the SDK.
///
/// Implementations own any caching; callers hold no token state.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current access token, or `None` when none exists yet.
    async fn get_access_token(&self) -> Option<String>;

    /// Triggers a refresh. The returned token is advisory; callers re-read
    /// through [`TokenProvider::get_access_token`] afterwards.
    async fn refresh_token(&self) -> Result<Option<String>>;

    /// Observes refresh failures. Ignored unless overridden.
    fn on_refresh_error(&self, _error: &EchoError) {}
}
