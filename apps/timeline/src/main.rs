use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    EventTracker, HttpEventTracker, NoopEventTracker, UpdatesListController, V1ApiClient,
};
use shared::domain::{Project, ProjectData, ProjectId};

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Server-assigned id of the project whose timeline to show.
    #[arg(long)]
    project_id: i64,
    #[arg(long)]
    slug: String,
    /// Display name; defaults to the slug.
    #[arg(long)]
    name: Option<String>,
    /// Referrer tag attached to the page-view event.
    #[arg(long)]
    ref_tag: Option<String>,
    /// Open the n-th update (1-based) once the list has loaded.
    #[arg(long)]
    open: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = load_settings();

    let api = Arc::new(V1ApiClient::new(settings.api_url));
    let tracker: Arc<dyn EventTracker> = match settings.events_url {
        Some(events_url) => Arc::new(HttpEventTracker::new(events_url)),
        None => Arc::new(NoopEventTracker),
    };
    let controller = UpdatesListController::new(api, tracker);

    let mut indicator_rx = controller.subscribe_loading_indicator_hidden();
    let mut list_rx = controller.subscribe_list_result();
    let mut navigate_rx = controller.subscribe_navigate_to_update();

    let project = Project {
        id: ProjectId(args.project_id),
        name: args.name.unwrap_or_else(|| args.slug.clone()),
        slug: args.slug,
    };
    let mut data = ProjectData::with_project(project.clone());
    data.ref_tag = args.ref_tag;

    controller.configure(project, data).await?;

    while !indicator_rx.recv().await? {
        println!("Loading updates...");
    }

    let Ok((project, updates)) = list_rx.try_recv() else {
        println!("Could not load updates, try again later.");
        return Ok(());
    };

    println!("{}: {} update(s)", project.name, updates.len());
    for item in &updates {
        println!("  #{:<3} {}", item.sequence, item.title);
    }

    if let Some(n) = args.open {
        match n.checked_sub(1).and_then(|i| updates.get(i)) {
            Some(selected) => {
                controller.select_update(selected.clone()).await?;
                let (project, update) = navigate_rx.recv().await?;
                println!(
                    "Opening update #{} of {}: {}",
                    update.sequence, project.name, update.title
                );
            }
            None => println!("No update at position {n}."),
        }
    }

    Ok(())
}
