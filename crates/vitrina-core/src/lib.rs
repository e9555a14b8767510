//! Vitrina core: view transitions for a single-page portfolio
//!
//! The page has two views, the home listing and a project detail. This
//! crate owns the rules for switching between them and keeping that switch
//! consistent with browser history, independent of any real browser.
//!
//! ## Module Structure
//!
//! - `config` - Element ids, marker names, motion presets (serde-loadable)
//! - `state` - The four-phase view state
//! - `controller` - `ViewTransitionController`, sole writer of the view state
//! - `content` - `ProjectContentBuilder`, assembles the project-detail fragment
//! - `bootstrap` - `PageBootstrapper`, maps clicks/history/deep links onto the controller
//! - `entrance` - Page-load entrance animation
//! - `routing` - Project ids in URLs and history payloads
//!
//! ## Architecture
//!
//! Every environment capability arrives through the port traits of
//! `vitrina-ports` (`Dom`, `Animator`, `Navigator`, `Clock`). The browser
//! binding lives in `vitrina-web`; tests use `vitrina-ports-mock`.
//!
//! Execution is single-threaded. Transitions are `!Send` futures that
//! suspend only while awaiting an animation completion.

pub mod bootstrap;
pub mod config;
pub mod content;
pub mod controller;
pub mod entrance;
pub mod error;
pub mod routing;
pub mod state;

pub use bootstrap::PageBootstrapper;
pub use config::{ElementIds, HoverMotion, Markers, MotionConfig, MotionPreset, PageConfig};
pub use content::ProjectContentBuilder;
pub use controller::{Dispatch, Transition, TransitionRequest, ViewTransitionController};
pub use entrance::PageEntrance;
pub use error::{ConfigError, TransitionError};
pub use state::ViewPhase;

pub use vitrina_ports::{HistoryEntry, ProjectId};
