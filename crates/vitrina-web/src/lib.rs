//! Browser binding for the Vitrina page controller
//!
//! This crate runs on the page's main thread. It implements the
//! `vitrina-ports` traits over web-sys and the global GSAP engine and
//! exports [`PageController`] to JavaScript.
//!
//! ## Module Structure
//!
//! - `dom` - `WebDom`, the live `Document`
//! - `animation` - `GsapAnimator`, `gsap.to/set/fromTo` bindings
//! - `navigation` - `BrowserNavigator`, `location` and `history`
//! - `clock` - `BrowserClock`, timeouts and animation frames
//! - `page` - `PageController`, listener wiring for the whole page
//! - `util` - console bindings and the `log` backend
//!
//! ## Usage
//!
//! ```js
//! import init, { PageController } from "./pkg/vitrina_web.js";
//! await init();
//! const page = new PageController();
//! page.mount();
//! ```

// =============================================================================
// Module declarations
// =============================================================================

mod animation;
mod clock;
mod dom;
mod navigation;
mod page;
pub mod util;

// =============================================================================
// Public re-exports
// =============================================================================

pub use animation::GsapAnimator;
pub use clock::BrowserClock;
pub use dom::WebDom;
pub use navigation::BrowserNavigator;
pub use page::PageController;
