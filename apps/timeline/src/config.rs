use std::fs;

use serde::Deserialize;

#[derive(Debug)]
pub struct Settings {
    pub api_url: String,
    pub events_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.example.com".into(),
            events_url: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    events_url: Option<String>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("timeline.toml") {
        apply_file_settings(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("TIMELINE_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("TIMELINE_EVENTS_URL") {
        settings.events_url = Some(v);
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) {
        if let Some(v) = file_cfg.api_url {
            settings.api_url = v;
        }
        if let Some(v) = file_cfg.events_url {
            settings.events_url = Some(v);
        }
    }
}
