//! Exported page controller
//!
//! The JS host constructs a [`PageController`] and calls `mount()` once.
//! Mounting binds every page listener, plays the entrance animation and
//! resolves a deep link from the initial URL.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Promise;
use log::LevelFilter;
use vitrina_core::{PageBootstrapper, PageConfig, PageEntrance, Transition, ViewTransitionController};
use vitrina_ports::{Dom, ProjectId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{PopStateEvent, Window};

use crate::animation::GsapAnimator;
use crate::clock::BrowserClock;
use crate::dom::WebDom;
use crate::navigation::BrowserNavigator;
use crate::util::init_logging;

type Bootstrapper = PageBootstrapper<WebDom, GsapAnimator, BrowserNavigator, BrowserClock>;

fn run(transition: Option<Transition>) {
    if let Some(transition) = transition {
        spawn_local(transition);
    }
}

/// Everything the listeners need, cloneable into each closure
#[derive(Clone)]
struct Wiring {
    window: Window,
    boot: Bootstrapper,
    dom: Rc<WebDom>,
    animator: Rc<GsapAnimator>,
    clock: Rc<BrowserClock>,
    config: Rc<PageConfig>,
}

impl Wiring {
    fn bind(&self) {
        self.bind_triggers();
        self.bind_back();
        self.bind_anchors();
        self.bind_history();
        self.bind_social();

        spawn_local(
            PageEntrance::new(
                Rc::clone(&self.dom),
                Rc::clone(&self.animator),
                Rc::clone(&self.clock),
                Rc::clone(&self.config),
            )
            .play(),
        );
        if let Some(task) = self.boot.deep_link() {
            spawn_local(task);
        }
        log::info!("[boot] page mounted");
    }

    fn bind_triggers(&self) {
        let triggers = self.boot.triggers();
        log::debug!("[boot] binding {} project triggers", triggers.len());
        for trigger in triggers {
            let boot = self.boot.clone();
            let node = trigger.clone();
            EventListener::new_with_options(
                &trigger,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    run(boot.on_trigger_click(&node));
                },
            )
            .forget();
        }
    }

    fn bind_back(&self) {
        let back = match self.boot.back_control() {
            Some(back) => back,
            None => {
                log::warn!("[boot] #{} not found", self.config.ids.back);
                return;
            }
        };
        let boot = self.boot.clone();
        EventListener::new_with_options(
            &back,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                run(boot.on_back_click());
            },
        )
        .forget();
    }

    fn bind_anchors(&self) {
        for anchor in self.boot.scroll_anchors() {
            let boot = self.boot.clone();
            let dom = Rc::clone(&self.dom);
            let link = anchor.clone();
            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(href) = dom.attribute(&link, "href") {
                        boot.on_anchor_click(&href);
                    }
                },
            )
            .forget();
        }
    }

    fn bind_history(&self) {
        let boot = self.boot.clone();
        EventListener::new(&self.window, "popstate", move |event| {
            let state = event
                .dyn_ref::<PopStateEvent>()
                .map(PopStateEvent::state)
                .unwrap_or(JsValue::NULL);
            run(boot.on_pop_state(BrowserNavigator::decode_state(&state)));
        })
        .forget();
    }

    fn bind_social(&self) {
        for link in self.boot.social_links() {
            for (event_type, entering) in [("mouseenter", true), ("mouseleave", false)] {
                let boot = self.boot.clone();
                let node = link.clone();
                EventListener::new(&link, event_type, move |_| {
                    boot.on_social_hover(&node, entering);
                })
                .forget();
            }
        }
    }
}

/// Page controller exported to JavaScript
#[wasm_bindgen]
pub struct PageController {
    wiring: Wiring,
    mounted: Cell<bool>,
}

#[wasm_bindgen]
impl PageController {
    /// Create a controller, optionally overriding the page configuration
    /// with a JSON document
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PageController, JsValue> {
        // Set up panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        init_logging(LevelFilter::Info);

        let config = match config_json {
            Some(json) => PageConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => PageConfig::default(),
        };
        let config = Rc::new(config);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let dom = Rc::new(WebDom::new(window.clone(), document));
        let animator = Rc::new(GsapAnimator::new());
        let clock = Rc::new(BrowserClock::new(window.clone()));
        let navigator = Rc::new(BrowserNavigator::new(window.clone()));
        let controller =
            ViewTransitionController::new(Rc::clone(&dom), Rc::clone(&animator), Rc::clone(&config));
        let boot = PageBootstrapper::new(controller, navigator, Rc::clone(&clock));

        Ok(Self {
            wiring: Wiring {
                window,
                boot,
                dom,
                animator,
                clock,
                config,
            },
            mounted: Cell::new(false),
        })
    }

    /// Bind the page once the document is parsed (immediately if it already is)
    ///
    /// Calling it again does nothing.
    pub fn mount(&self) {
        if self.mounted.replace(true) {
            log::debug!("[boot] already mounted");
            return;
        }
        let document = self.wiring.dom.document();
        if document.ready_state() == "loading" {
            let wiring = self.wiring.clone();
            EventListener::once(document, "DOMContentLoaded", move |_| wiring.bind()).forget();
        } else {
            self.wiring.bind();
        }
    }

    /// True while a project is shown or being opened
    pub fn in_project_view(&self) -> bool {
        self.wiring.boot.controller().in_project_view()
    }

    /// Open a project as if its trigger had been clicked
    ///
    /// Resolves to `true` once the detail view is built (`false` when the
    /// project was already shown or the request was queued). Rejects when no
    /// trigger carries `id`.
    pub fn open_project(&self, id: String) -> Promise {
        let result = self.wiring.boot.open_by_id(&ProjectId::new(id));
        future_to_promise(async move {
            match result {
                Ok(Some(transition)) => {
                    transition.await;
                    Ok(JsValue::TRUE)
                }
                Ok(None) => Ok(JsValue::FALSE),
                Err(e) => Err(JsValue::from_str(&e.to_string())),
            }
        })
    }

    /// Return to the home view
    ///
    /// Resolves to `true` once home is shown again, `false` when already
    /// home or when the close was queued behind a running transition.
    pub fn close_project(&self) -> Promise {
        let transition = self.wiring.boot.on_back_click();
        future_to_promise(async move {
            match transition {
                Some(transition) => {
                    transition.await;
                    Ok(JsValue::TRUE)
                }
                None => Ok(JsValue::FALSE),
            }
        })
    }
}
