//! Project file persistence and session bookkeeping.
//!
//! A project file wraps the whole schema with naming, versioning and
//! timestamps. Opening and saving always move the schema as one value;
//! there is no partial or delta persistence. The actual transport (file
//! picker, browser download, storage key) belongs to the embedding
//! application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::schema::Schema;

/// Semantic version of the project file format.
pub const FILE_FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("project file has no schema")]
    MissingSchema,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// The persisted unit: the full schema plus file-level bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub name: String,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            version: FILE_FORMAT_VERSION.to_string(),
            created_at: now,
            last_modified: now,
            schema,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ProjectMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Bumps `last_modified`; call before serializing a save.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Parses a project file. A `schema` field is required; anything else
    /// is a format error and the caller's in-memory schema stays as it
    /// was.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("schema").is_none() {
            return Err(ProjectError::MissingSchema);
        }
        let project: ProjectFile = serde_json::from_value(value)?;
        debug!(
            name = %project.name,
            tables = project.schema.tables.len(),
            "opened project file"
        );
        Ok(project)
    }

    /// Serializes the whole project, pretty-printed.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Session-side save state, driven by the embedding application's save
/// loop (debounced auto-save lives there, not here).
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectState {
    pub current_file: Option<String>,
    pub has_unsaved_changes: bool,
    pub auto_save_enabled: bool,
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            current_file: None,
            has_unsaved_changes: false,
            auto_save_enabled: true,
            last_saved: None,
        }
    }
}

impl ProjectState {
    pub fn mark_changed(&mut self) {
        self.has_unsaved_changes = true;
    }

    pub fn mark_saved(&mut self, file: impl Into<String>) {
        self.current_file = Some(file.into());
        self.has_unsaved_changes = false;
        self.last_saved = Some(Utc::now());
    }

    /// Back to an unnamed, clean session (the "new project" action).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
