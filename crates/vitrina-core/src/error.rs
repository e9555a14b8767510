//! Error types

use vitrina_ports::ProjectId;

/// Rejected transition requests
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// `close_project` while home is shown or already being restored
    #[error("home view is already shown")]
    AlreadyHome,

    /// No trigger element carries this project id
    #[error("no trigger element for project {0}")]
    UnknownProject(ProjectId),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tag name the document cannot create
    #[error("invalid element tag in page config: {0:?}")]
    InvalidTag(String),
}
