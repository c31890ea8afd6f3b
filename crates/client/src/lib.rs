//! Client for the echo control plane: apps, balances, users and payments.

pub mod error;
pub mod resource;
pub mod resources;

pub use error::{ApiError, ErrorCode, parse_echo_error};
pub use resource::ResourceClient;
pub use resources::{
    App, AppsResource, Balance, BalanceResource, FreeBalance, PaymentLink, PaymentLinkRequest,
    PaymentsResource, Referral, User, UsersResource,
};

use echo_config::EchoConfig;
use echo_provider::HttpFetch;
use echo_types::{Fetch, TokenProvider};
use std::sync::Arc;

/// Entry point bundling every resource client over one authenticated session.
#[derive(Clone)]
pub struct EchoClient {
    pub apps: AppsResource,
    pub balance: BalanceResource,
    pub users: UsersResource,
    pub payments: PaymentsResource,
    base_url: String,
}

impl EchoClient {
    /// Connects to the control plane named by `config` over the real network.
    #[must_use]
    pub fn new(config: &EchoConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_fetch(config, tokens, Arc::new(HttpFetch::default()))
    }

    #[must_use]
    pub fn with_fetch(
        config: &EchoConfig,
        tokens: Arc<dyn TokenProvider>,
        fetch: Arc<dyn Fetch>,
    ) -> Self {
        let client = ResourceClient::new(config.control_plane_url(), fetch, tokens);
        tracing::debug!(base_url = client.base_url(), "created echo control-plane client");
        Self {
            apps: AppsResource::new(client.clone()),
            balance: BalanceResource::new(client.clone()),
            users: UsersResource::new(client.clone()),
            payments: PaymentsResource::new(client.clone()),
            base_url: client.base_url().to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::CannedFetch;
    use echo_auth::ApiKeyTokenProvider;

    #[test]
    fn test_base_path_wins() {
        let config = EchoConfig {
            base_path: Some("https://staging.echo.test/".into()),
            ..EchoConfig::new("60601628-cdb7-481e-8f7e-921981220348")
                .with_echo_url("https://ignored.test")
        };
        let client = EchoClient::new(&config, Arc::new(ApiKeyTokenProvider::new("k")));
        assert_eq!(client.base_url(), "https://staging.echo.test");
    }

    #[test]
    fn test_default_control_plane() {
        let client = EchoClient::new(
            &EchoConfig::new("60601628-cdb7-481e-8f7e-921981220348"),
            Arc::new(ApiKeyTokenProvider::new("k")),
        );
        assert_eq!(client.base_url(), echo_config::DEFAULT_ECHO_URL);
    }

    #[tokio::test]
    async fn test_resources_share_session() {
        let fetch = CannedFetch::new(vec![
            Ok((200, r#"{"id":"u1"}"#)),
            Ok((200, r#"{"balance":1}"#)),
        ]);
        let client = EchoClient::with_fetch(
            &EchoConfig::new("60601628-cdb7-481e-8f7e-921981220348")
                .with_echo_url("https://echo.test"),
            Arc::new(ApiKeyTokenProvider::new("echo_sk")),
            fetch.clone(),
        );
        client.users.get_user().await.unwrap();
        client.balance.get_balance().await.unwrap();
        assert_eq!(fetch.seen_count(), 2);
        assert_eq!(fetch.header(1, "authorization").as_deref(), Some("Bearer echo_sk"));
    }
}
