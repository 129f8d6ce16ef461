use serde::{Deserialize, Serialize};

use crate::domain::{ProjectId, Update};

/// One fetch's result: an ordered batch of updates plus pagination metadata.
/// Not retained anywhere; consumers take what they need from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatesEnvelope {
    pub updates: Vec<Update>,
    pub urls: UrlsEnvelope,
}

impl UpdatesEnvelope {
    /// URL of the next page, absent when this was the last one.
    pub fn more_updates_url(&self) -> Option<&str> {
        self.urls.api.more_updates.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlsEnvelope {
    pub api: ApiEnvelope,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_updates: Option<String>,
}

/// Wire form of a page-view analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewedPayload {
    pub event: String,
    pub context_page: String,
    pub project_id: ProjectId,
    pub project_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_ref_tag: Option<String>,
}
