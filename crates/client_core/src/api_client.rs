use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Project, error::ApiError, protocol::UpdatesEnvelope};
use tracing::debug;

use crate::{FetchUpdatesError, UpdatesApi};

/// Thin HTTP client for the v1 JSON API's update endpoints.
pub struct V1ApiClient {
    http: Client,
    base_url: String,
}

impl V1ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Follows a pagination URL taken from a previous envelope's
    /// `urls.api.more_updates`. The URL is requested as-is.
    pub async fn fetch_updates_page(
        &self,
        more_url: &str,
    ) -> Result<UpdatesEnvelope, FetchUpdatesError> {
        debug!(url = more_url, "fetching further updates page");
        self.get_envelope(more_url.to_string()).await
    }

    async fn get_envelope(&self, url: String) -> Result<UpdatesEnvelope, FetchUpdatesError> {
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error = response.json::<ApiError>().await.ok();
            return Err(FetchUpdatesError::Status {
                status: status.as_u16(),
                error,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl UpdatesApi for V1ApiClient {
    async fn fetch_project_updates(
        &self,
        project: &Project,
    ) -> Result<UpdatesEnvelope, FetchUpdatesError> {
        let url = format!("{}/v1/projects/{}/updates", self.base_url, project.id.0);
        self.get_envelope(url).await
    }
}
