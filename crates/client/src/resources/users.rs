use crate::{error::ApiError, resource::ResourceClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of registering a referral code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferralRequest<'a> {
    echo_app_id: &'a str,
    code: &'a str,
}

#[derive(Clone)]
pub struct UsersResource {
    client: ResourceClient,
}

impl UsersResource {
    #[must_use]
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/user`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn get_user(&self) -> Result<User, ApiError> {
        self.client.get("/api/v1/user").await
    }

    /// `POST /api/v1/user/referral`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn register_referral_code(
        &self,
        app_id: &str,
        code: &str,
    ) -> Result<Referral, ApiError> {
        self.client
            .post(
                "/api/v1/user/referral",
                &ReferralRequest {
                    echo_app_id: app_id,
                    code,
                },
            )
            .await
    }
}
