//! Router-bound provider clients.
//!
//! [`EchoFetch`] is the authenticated network layer: bearer injection, one
//! retry on `401`, and the `402` insufficient-funds callback. The
//! `create_echo_*` factories validate an [`echo_config::EchoConfig`] and wire
//! `EchoFetch` into a [`ProviderClient`] for each supported provider.

pub mod client;
pub mod echo_fetch;
pub mod factory;
pub mod http_util;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientOptions, ProviderClient};
pub use echo_fetch::{ECHO_FETCH_NAME, EchoFetch};
pub use factory::{
    PLACEHOLDER_API_KEY, create_echo_anthropic, create_echo_client, create_echo_client_with_fetch,
    create_echo_google, create_echo_groq, create_echo_openai, create_echo_openrouter,
    create_echo_xai,
};
pub use http_util::HttpFetch;
pub use registry::ProviderKind;
