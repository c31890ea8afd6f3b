use crate::{error::ApiError, resource::ResourceClient};
use serde::{Deserialize, Serialize};

/// Parameters of a Stripe checkout link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkRequest {
    /// Amount to credit, in USD.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
}

impl PaymentLinkRequest {
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            description: None,
            success_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentLinkResponse {
    payment_link: PaymentLink,
}

#[derive(Clone)]
pub struct PaymentsResource {
    client: ResourceClient,
}

impl PaymentsResource {
    #[must_use]
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `POST /api/v1/stripe/payment-link`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLink, ApiError> {
        let resp: PaymentLinkResponse = self
            .client
            .post("/api/v1/stripe/payment-link", request)
            .await?;
        Ok(resp.payment_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::{CannedFetch, client};
    use serde_json::Value;

    #[tokio::test]
    async fn test_create_payment_link() {
        let fetch = CannedFetch::new(vec![Ok((
            200,
            r#"{"paymentLink":{"url":"https://buy.stripe.com/x","id":"pl_1","amount":10}}"#,
        ))]);
        let link = PaymentsResource::new(client(fetch.clone()))
            .create_payment_link(&PaymentLinkRequest::new(10.0))
            .await
            .unwrap();
        assert_eq!(link.url, "https://buy.stripe.com/x");
        assert_eq!(link.id.as_deref(), Some("pl_1"));

        let seen = fetch.seen.lock().unwrap();
        let sent: Value = serde_json::from_slice(seen[0].body()).unwrap();
        assert_eq!(sent, serde_json::json!({"amount": 10.0}));
    }
}
