use crate::{error::ApiError, resource::ResourceClient};
use serde::{Deserialize, Serialize};

/// Paid credit held by the current user, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub balance: f64,
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub total_spent: f64,
}

/// Free-tier credit the current user has left in one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBalance {
    pub spend_pool_balance: f64,
    #[serde(default)]
    pub user_spend_info: Option<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBalanceRequest<'a> {
    echo_app_id: &'a str,
}

#[derive(Clone)]
pub struct BalanceResource {
    client: ResourceClient,
}

impl BalanceResource {
    #[must_use]
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/balance`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn get_balance(&self) -> Result<Balance, ApiError> {
        self.client.get("/api/v1/balance").await
    }

    /// `POST /api/v1/balance/free`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn get_free_balance(&self, app_id: &str) -> Result<FreeBalance, ApiError> {
        self.client
            .post(
                "/api/v1/balance/free",
                &FreeBalanceRequest {
                    echo_app_id: app_id,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::{CannedFetch, client};
    use serde_json::Value;

    #[tokio::test]
    async fn test_get_balance() {
        let fetch = CannedFetch::new(vec![Ok((200, r#"{"balance":12.5,"totalPaid":20}"#))]);
        let balance = BalanceResource::new(client(fetch)).get_balance().await.unwrap();
        assert!((balance.balance - 12.5).abs() < f64::EPSILON);
        assert!((balance.total_paid - 20.0).abs() < f64::EPSILON);
        assert!(balance.total_spent.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_free_balance_sends_app_id() {
        let fetch = CannedFetch::new(vec![Ok((200, r#"{"spendPoolBalance":3}"#))]);
        let free = BalanceResource::new(client(fetch.clone()))
            .get_free_balance("app-1")
            .await
            .unwrap();
        assert!((free.spend_pool_balance - 3.0).abs() < f64::EPSILON);

        let seen = fetch.seen.lock().unwrap();
        assert_eq!(seen[0].method(), http::Method::POST);
        let sent: Value = serde_json::from_slice(seen[0].body()).unwrap();
        assert_eq!(sent["echoAppId"], "app-1");
    }
}
