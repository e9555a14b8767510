//! Mock port implementations for testing Vitrina
//!
//! These stand in for the browser so the view-transition core can be
//! exercised natively:
//!
//! - [`MockDom`]: arena-backed element tree with a CSS selector subset
//! - [`MockAnimator`]: records every tween; completes automatically or on demand
//! - [`MockNavigator`]: in-memory URL and history log
//! - [`MockClock`]: records delays and frame requests, resolves immediately

mod animator;
mod clock;
mod dom;
mod navigator;
mod selector;

pub use animator::{AnimationCall, AnimationKind, MockAnimator};
pub use clock::MockClock;
pub use dom::{MockDom, NodeId};
pub use navigator::MockNavigator;
