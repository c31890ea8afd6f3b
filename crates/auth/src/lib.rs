//! Token providers for the echo SDK.
//!
//! [`ApiKeyTokenProvider`] serves a fixed key; [`OAuthTokenProvider`] defers to
//! closures owned by the host application. The [`token_fn`] module turns
//! either into the callbacks consumed by the fetch layer.

pub mod api_key;
pub mod oauth;
pub mod token_fn;

pub use api_key::ApiKeyTokenProvider;
pub use oauth::OAuthTokenProvider;
