use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProjectId);
id_newtype!(UpdateId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub slug: String,
    pub name: String,
}

/// One timeline item belonging to a project. Identity is the server-assigned
/// id; list ordering is whatever order the server returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub id: UpdateId,
    pub project_id: ProjectId,
    pub sequence: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// View context captured when the updates screen is opened; handed to the
/// event tracker unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub project: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_ref_tag: Option<String>,
}

impl ProjectData {
    pub fn with_project(project: Project) -> Self {
        Self {
            project,
            ref_tag: None,
            cookie_ref_tag: None,
        }
    }
}
