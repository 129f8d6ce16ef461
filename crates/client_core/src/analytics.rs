//! Fire-and-forget page-view tracking.

use shared::{domain::ProjectData, protocol::PageViewedPayload};
use tracing::{debug, warn};

pub const PAGE_VIEWED_EVENT_NAME: &str = "Page Viewed";

/// Screen identifier attached to page-view events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPage {
    Updates,
}

impl ContextPage {
    pub fn context_name(self) -> &'static str {
        match self {
            ContextPage::Updates => "updates",
        }
    }
}

/// Records that a screen was presented. Implementations must not block the
/// caller; delivery is best-effort and failures stay internal.
pub trait EventTracker: Send + Sync {
    fn track_page_viewed(&self, context: &ProjectData);
}

/// Null tracker for consumers running with analytics disabled.
pub struct NoopEventTracker;

impl EventTracker for NoopEventTracker {
    fn track_page_viewed(&self, _context: &ProjectData) {}
}

/// Posts page-view events to an HTTP collection endpoint. Delivery happens
/// on a spawned task, so tracking calls must come from within a Tokio
/// runtime.
pub struct HttpEventTracker {
    http: reqwest::Client,
    events_url: String,
}

impl HttpEventTracker {
    pub fn new(events_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            events_url: events_url.into(),
        }
    }

    fn page_viewed_payload(context: &ProjectData) -> PageViewedPayload {
        PageViewedPayload {
            event: PAGE_VIEWED_EVENT_NAME.to_string(),
            context_page: ContextPage::Updates.context_name().to_string(),
            project_id: context.project.id,
            project_slug: context.project.slug.clone(),
            ref_tag: context.ref_tag.clone(),
            cookie_ref_tag: context.cookie_ref_tag.clone(),
        }
    }
}

impl EventTracker for HttpEventTracker {
    fn track_page_viewed(&self, context: &ProjectData) {
        let payload = Self::page_viewed_payload(context);
        debug!(project_id = payload.project_id.0, "queueing page view event");
        let http = self.http.clone();
        let events_url = self.events_url.clone();
        tokio::spawn(async move {
            match http.post(&events_url).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(
                        status = response.status().as_u16(),
                        "analytics endpoint rejected page view event"
                    );
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "failed to deliver page view event"),
            }
        });
    }
}
