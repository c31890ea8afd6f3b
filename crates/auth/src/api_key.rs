//! Static API key token provider.
//!
//! The key never changes, so refreshing is a no-op that hands back the same key.

use async_trait::async_trait;
use echo_types::{Result, TokenProvider};
use secrecy::{ExposeSecret as _, SecretString};

/// A [`TokenProvider`] backed by a fixed API key.
#[derive(Debug)]
pub struct ApiKeyTokenProvider {
    key: SecretString,
}

impl ApiKeyTokenProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }

    fn token(&self) -> Option<String> {
        let key = self.key.expose_secret();
        (!key.is_empty()).then(|| key.to_owned())
    }
}

#[async_trait]
impl TokenProvider for ApiKeyTokenProvider {
    async fn get_access_token(&self) -> Option<String> {
        self.token()
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.token())
    }
}
