//! `create_echo_*` factories: validated, router-bound provider clients whose
//! network layer is [`EchoFetch`].

use crate::{
    client::{ClientOptions, ProviderClient},
    echo_fetch::{ECHO_FETCH_NAME, EchoFetch},
    http_util::HttpFetch,
    registry::ProviderKind,
};
use echo_auth::token_fn::bind_app;
use echo_config::EchoConfig;
use echo_types::{AppTokenFn, EchoError, Fetch, InsufficientFundsFn, Result};
use http::HeaderMap;
use std::sync::Arc;

/// API key handed to provider clients. Never reaches the router: `EchoFetch`
/// overwrites `Authorization`, and the router ignores provider key headers.
pub const PLACEHOLDER_API_KEY: &str = "echo-placeholder-key";

/// Builds a client for `kind` over the real network.
///
/// # Errors
///
/// Returns [`EchoError::InvalidAppId`] if `config.app_id` is not a UUID v4, or
/// [`EchoError::Dependency`] if the client did not accept the injected fetch.
pub fn create_echo_client(
    kind: ProviderKind,
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client_with_fetch(
        kind,
        config,
        get_token,
        on_insufficient_funds,
        Arc::new(HttpFetch::default()),
    )
}

/// Like [`create_echo_client`], with `inner` as the underlying transport.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_client_with_fetch(
    kind: ProviderKind,
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
    inner: Arc<dyn Fetch>,
) -> Result<ProviderClient> {
    config.validate(kind.factory_name())?;

    let fetch = EchoFetch::new(
        inner,
        bind_app(get_token, config.app_id.as_str()),
        on_insufficient_funds,
    );
    let client = ProviderClient::new(
        kind,
        ClientOptions {
            base_url: config.router_url().to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            fetch: Some(Arc::new(fetch)),
            default_headers: HeaderMap::new(),
        },
    );

    if kind == ProviderKind::Anthropic {
        ensure_echo_fetch(&client)?;
    }

    tracing::debug!(provider = %kind, base_url = client.base_url(), "created echo provider client");
    Ok(client)
}

/// Fails if `client` is not using [`EchoFetch`], which would send requests
/// without echo credentials.
fn ensure_echo_fetch(client: &ProviderClient) -> Result<()> {
    let installed = client.fetch_name();
    if installed == ECHO_FETCH_NAME {
        return Ok(());
    }
    Err(EchoError::Dependency(format!(
        "{} client ignored the injected fetch (installed: `{installed}`, expected: \
         `{ECHO_FETCH_NAME}`); requests would bypass echo authentication. \
         Check that the provider client version supports a custom fetch.",
        client.kind()
    )))
}

/// OpenAI client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_openai(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::OpenAi, config, get_token, on_insufficient_funds)
}

/// Anthropic client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_anthropic(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::Anthropic, config, get_token, on_insufficient_funds)
}

/// Google (Gemini) client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_google(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::Google, config, get_token, on_insufficient_funds)
}

/// Groq client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_groq(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::Groq, config, get_token, on_insufficient_funds)
}

/// OpenRouter client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_openrouter(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::OpenRouter, config, get_token, on_insufficient_funds)
}

/// xAI (OpenAI-compatible) client routed through echo.
///
/// # Errors
///
/// See [`create_echo_client`].
pub fn create_echo_xai(
    config: &EchoConfig,
    get_token: AppTokenFn,
    on_insufficient_funds: Option<InsufficientFundsFn>,
) -> Result<ProviderClient> {
    create_echo_client(ProviderKind::Xai, config, get_token, on_insufficient_funds)
}
