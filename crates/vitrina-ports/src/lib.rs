//! Port traits for the Vitrina page controller
//!
//! This crate defines the capabilities the view-transition core needs from
//! its environment, so the same core runs in the browser (web-sys) and in
//! native tests (mock ports).
//!
//! # Ports
//!
//! - **Dom**: element lookup, node creation/cloning, attribute and style access
//! - **Animator**: declarative from/to style tweens with staggering and completion
//! - **Navigator**: URL query/hash access and history push/replace
//! - **Clock**: timed delays and the next paint opportunity
//!
//! # Platform Implementations
//!
//! - **Browser**: `vitrina-web` (web-sys `Document`, global `gsap`, `window.history`)
//! - **Tests**: `vitrina-ports-mock` (arena DOM, recording animator, in-memory history)

mod completion;
mod dom;
mod history;
mod motion;

pub use completion::{Completion, CompletionSignal};
pub use dom::{Dom, DomError};
pub use history::{HistoryEntry, ProjectId};
pub use motion::{Stagger, StaggerFrom, Timing, Tween};

/// Animation engine port
///
/// Executes declarative style transitions over a set of targets. The
/// returned [`Completion`] resolves once the engine reports the whole
/// (possibly staggered) tween finished. Callers that do not need to wait
/// simply drop it.
pub trait Animator<N> {
    /// Whether the underlying engine is loaded and usable
    fn is_available(&self) -> bool;

    /// Apply a style immediately, without interpolation
    fn set(&self, targets: &[N], tween: &Tween);

    /// Animate from the current style to `tween`
    ///
    /// On WASM: `gsap.to`
    ///
    /// # Arguments
    /// * `targets` - Elements animated together
    /// * `tween` - End style
    /// * `timing` - Duration, easing and optional stagger
    ///
    /// # Returns
    /// * `Completion` - Resolves when the last target finishes, or at once
    ///   if the engine rejects the call
    fn to(&self, targets: &[N], tween: &Tween, timing: &Timing) -> Completion;

    /// Animate from `from` to `to`
    fn from_to(&self, targets: &[N], from: &Tween, to: &Tween, timing: &Timing) -> Completion;
}

/// Browser navigation port
///
/// Only read access to the URL and write access to the history stack.
/// Back/forward notifications are delivered by the platform layer, which
/// decodes the popped payload into a [`HistoryEntry`].
pub trait Navigator {
    /// Value of a URL query parameter, if present
    ///
    /// # Returns
    /// * `Some(value)` - Percent-decoded value (`+` reads as a space)
    /// * `None` - The parameter is absent
    fn query_param(&self, name: &str) -> Option<String>;

    /// The URL fragment including the leading `#`, or an empty string
    fn hash(&self) -> String;

    /// Push a new history entry carrying `entry` as its payload
    fn push_state(&self, entry: &HistoryEntry, url: &str);

    /// Replace the current history entry's payload and URL
    fn replace_state(&self, entry: &HistoryEntry, url: &str);
}

/// Scheduling port
pub trait Clock {
    /// Resolve after `ms` milliseconds
    fn sleep(&self, ms: u32) -> Completion;

    /// Resolve at the next paint opportunity
    fn next_frame(&self) -> Completion;
}
