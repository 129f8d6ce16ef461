use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{Project, ProjectData, Update},
    error::ApiError,
    protocol::UpdatesEnvelope,
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

mod analytics;
mod api_client;

pub use analytics::{
    ContextPage, EventTracker, HttpEventTracker, NoopEventTracker, PAGE_VIEWED_EVENT_NAME,
};
pub use api_client::V1ApiClient;

const OUTPUT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum FetchUpdatesError {
    #[error("updates request failed in transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("updates request rejected with status {status}")]
    Status { status: u16, error: Option<ApiError> },
}

/// Fetches pages of updates for a project. Implemented by [`V1ApiClient`]
/// against the real API and by stubs in tests.
#[async_trait]
pub trait UpdatesApi: Send + Sync {
    async fn fetch_project_updates(
        &self,
        project: &Project,
    ) -> std::result::Result<UpdatesEnvelope, FetchUpdatesError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchPhase {
    Idle,
    Fetching,
    Settled(FetchOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchOutcome {
    Loaded,
    Failed,
}

struct ControllerInner {
    phase: FetchPhase,
    project: Option<Project>,
}

/// Presentation state for a project's updates list.
///
/// Configured once with the project whose timeline is being shown; fetches
/// the first page of updates in the background and drives four output
/// channels that a view layer subscribes to. Selection of a list item is
/// routed out as a navigation event, never handled here.
pub struct UpdatesListController {
    api: Arc<dyn UpdatesApi>,
    tracker: Arc<dyn EventTracker>,
    inner: Mutex<ControllerInner>,
    loading_indicator_hidden: broadcast::Sender<bool>,
    is_fetching: broadcast::Sender<bool>,
    list_result: broadcast::Sender<(Project, Vec<Update>)>,
    navigate_to_update: broadcast::Sender<(Project, Update)>,
}

impl UpdatesListController {
    pub fn new(api: Arc<dyn UpdatesApi>, tracker: Arc<dyn EventTracker>) -> Arc<Self> {
        let (loading_indicator_hidden, _) = broadcast::channel(OUTPUT_CHANNEL_CAPACITY);
        let (is_fetching, _) = broadcast::channel(OUTPUT_CHANNEL_CAPACITY);
        let (list_result, _) = broadcast::channel(OUTPUT_CHANNEL_CAPACITY);
        let (navigate_to_update, _) = broadcast::channel(OUTPUT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            tracker,
            inner: Mutex::new(ControllerInner {
                phase: FetchPhase::Idle,
                project: None,
            }),
            loading_indicator_hidden,
            is_fetching,
            list_result,
            navigate_to_update,
        })
    }

    /// Progress-indicator visibility. Per configuration this emits exactly
    /// `false` (show) when the fetch starts and `true` (hide) when it
    /// settles, success or failure.
    pub fn subscribe_loading_indicator_hidden(&self) -> broadcast::Receiver<bool> {
        self.loading_indicator_hidden.subscribe()
    }

    /// Fetch-in-flight flag. Per configuration this emits exactly `true`
    /// then `false`, mirroring the indicator channel.
    pub fn subscribe_is_fetching(&self) -> broadcast::Receiver<bool> {
        self.is_fetching.subscribe()
    }

    /// The loaded list, paired with its project. Emits once per successful
    /// fetch (an empty page is a valid result) and never on failure.
    pub fn subscribe_list_result(&self) -> broadcast::Receiver<(Project, Vec<Update>)> {
        self.list_result.subscribe()
    }

    /// Navigation requests, one per [`select_update`](Self::select_update)
    /// call, in call order.
    pub fn subscribe_navigate_to_update(&self) -> broadcast::Receiver<(Project, Update)> {
        self.navigate_to_update.subscribe()
    }

    /// One-time setup: records the page view, flips the loading channels to
    /// their started state and kicks off the single background fetch of the
    /// first updates page. Returns without waiting for the fetch. A second
    /// call is an error and starts nothing.
    pub async fn configure(self: &Arc<Self>, project: Project, data: ProjectData) -> Result<()> {
        {
            let mut inner = self.inner.lock().await;
            if inner.phase != FetchPhase::Idle {
                return Err(anyhow!(
                    "updates list is already configured for project {}",
                    project.id.0
                ));
            }
            inner.phase = FetchPhase::Fetching;
            inner.project = Some(project.clone());
        }

        self.tracker.track_page_viewed(&data);

        // Started state must reach subscriber buffers before the fetch task
        // exists, so it stays observable even when the fetch resolves
        // immediately.
        let _ = self.is_fetching.send(true);
        let _ = self.loading_indicator_hidden.send(false);

        debug!(project_id = project.id.0, slug = %project.slug, "fetching first updates page");
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let result = controller.api.fetch_project_updates(&project).await;
            controller.settle(project, result).await;
        });

        Ok(())
    }

    async fn settle(
        &self,
        project: Project,
        result: std::result::Result<UpdatesEnvelope, FetchUpdatesError>,
    ) {
        let outcome = if result.is_ok() {
            FetchOutcome::Loaded
        } else {
            FetchOutcome::Failed
        };
        {
            let mut inner = self.inner.lock().await;
            inner.phase = FetchPhase::Settled(outcome);
        }

        match result {
            Ok(envelope) => {
                info!(
                    project_id = project.id.0,
                    updates = envelope.updates.len(),
                    "loaded updates page"
                );
                let _ = self.list_result.send((project, envelope.updates));
            }
            Err(err) => {
                warn!(project_id = project.id.0, error = %err, "updates fetch failed");
            }
        }

        let _ = self.is_fetching.send(false);
        let _ = self.loading_indicator_hidden.send(true);
    }

    /// Routes a tapped update out to whatever presents the detail screen.
    /// The update is expected to come from the most recently emitted list;
    /// membership is not checked here.
    pub async fn select_update(&self, update: Update) -> Result<()> {
        let inner = self.inner.lock().await;
        let project = inner
            .project
            .clone()
            .ok_or_else(|| anyhow!("no project configured, cannot route update selection"))?;
        debug!(update_id = update.id.0, "routing update selection");
        let _ = self.navigate_to_update.send((project, update));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
