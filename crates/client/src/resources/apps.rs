use crate::{error::ApiError, resource::ResourceClient};
use serde::{Deserialize, Serialize};

/// An echo app owned by or shared with the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Deserialize)]
struct AppList {
    apps: Vec<App>,
}

#[derive(Clone)]
pub struct AppsResource {
    client: ResourceClient,
}

impl AppsResource {
    #[must_use]
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/apps`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn list_apps(&self) -> Result<Vec<App>, ApiError> {
        let list: AppList = self.client.get("/api/v1/apps").await?;
        Ok(list.apps)
    }

    /// `GET /api/v1/apps/{id}`
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] on any failure.
    pub async fn get_app(&self, app_id: &str) -> Result<App, ApiError> {
        self.client.get(&format!("/api/v1/apps/{app_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        resource::tests::{CannedFetch, client},
    };

    #[tokio::test]
    async fn test_list_apps() {
        let fetch = CannedFetch::new(vec![Ok((
            200,
            r#"{"apps":[{"id":"a1","name":"Demo","isPublic":true,"createdAt":"2025-01-01"}]}"#,
        ))]);
        let apps = AppsResource::new(client(fetch)).list_apps().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "Demo");
        assert!(apps[0].is_public);
        assert_eq!(apps[0].created_at.as_deref(), Some("2025-01-01"));
        assert!(apps[0].description.is_none());
    }

    #[tokio::test]
    async fn test_get_app_not_found() {
        let fetch = CannedFetch::new(vec![Ok((404, "app not found"))]);
        let err = AppsResource::new(client(fetch.clone()))
            .get_app("a1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Http(404));
        assert_eq!(err.endpoint.as_deref(), Some("/api/v1/apps/a1"));
        assert_eq!(
            fetch.seen.lock().unwrap()[0].uri(),
            "https://echo.test/api/v1/apps/a1"
        );
    }
}
