//! History payloads and project identifiers

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque project token (e.g. `"01"`)
///
/// Matches the trigger marker attribute and the source content block id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Payload pushed alongside every URL change
///
/// Serializes as `{ "proyectoId": "<id>" }` for a project view and `{}`
/// for home. Unknown fields in a popped payload are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(
        rename = "proyectoId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<ProjectId>,
}

impl HistoryEntry {
    /// Entry for the home view
    pub fn home() -> Self {
        Self { project_id: None }
    }

    /// Entry for a project detail view
    pub fn project(id: ProjectId) -> Self {
        Self {
            project_id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_entry_wire_format() {
        let entry = HistoryEntry::project(ProjectId::new("03"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"proyectoId":"03"}"#);
    }

    #[test]
    fn test_home_entry_is_empty_object() {
        let json = serde_json::to_string(&HistoryEntry::home()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_foreign_payload_ignores_unknown_fields() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"scroll":120,"proyectoId":"07"}"#).unwrap();
        assert_eq!(entry.project_id, Some(ProjectId::new("07")));

        let entry: HistoryEntry = serde_json::from_str(r#"{"scroll":120}"#).unwrap();
        assert_eq!(entry, HistoryEntry::home());
    }
}
