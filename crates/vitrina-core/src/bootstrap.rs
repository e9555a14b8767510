//! Page wiring
//!
//! Translates page events (trigger clicks, the back control, back/forward
//! navigation, in-page anchors, the initial URL) into controller requests
//! and keeps browser history in step with them. The platform layer binds
//! the actual event listeners and drives the returned transitions.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use vitrina_ports::{Animator, Clock, Dom, HistoryEntry, Navigator, ProjectId, Timing, Tween};

use crate::controller::{Dispatch, Transition, TransitionRequest, ViewTransitionController};
use crate::error::TransitionError;
use crate::routing;

/// Maps page events onto the [`ViewTransitionController`]
pub struct PageBootstrapper<D: Dom, A, N, C> {
    controller: ViewTransitionController<D, A>,
    navigator: Rc<N>,
    clock: Rc<C>,
}

impl<D: Dom, A, N, C> Clone for PageBootstrapper<D, A, N, C> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            navigator: Rc::clone(&self.navigator),
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<D, A, N, C> PageBootstrapper<D, A, N, C>
where
    D: Dom + 'static,
    A: Animator<D::Node> + 'static,
    N: Navigator + 'static,
    C: Clock + 'static,
{
    pub fn new(controller: ViewTransitionController<D, A>, navigator: Rc<N>, clock: Rc<C>) -> Self {
        Self {
            controller,
            navigator,
            clock,
        }
    }

    pub fn controller(&self) -> &ViewTransitionController<D, A> {
        &self.controller
    }

    fn dom(&self) -> &D {
        self.controller.dom()
    }

    fn param(&self) -> &str {
        &self.controller.config().markers.query_param
    }

    // === Targets the platform layer binds listeners to ===

    /// Every element carrying the trigger marker
    pub fn triggers(&self) -> Vec<D::Node> {
        self.query_all(&self.controller.config().trigger_selector())
    }

    pub fn back_control(&self) -> Option<D::Node> {
        self.dom().element_by_id(&self.controller.config().ids.back)
    }

    /// In-page anchors eligible for smooth scrolling
    pub fn scroll_anchors(&self) -> Vec<D::Node> {
        let dom = self.dom();
        self.query_all(&self.controller.config().markers.anchor_links)
            .into_iter()
            .filter(|a| {
                dom.attribute(a, "href")
                    .is_some_and(|href| routing::is_scroll_anchor(&href, self.param()))
            })
            .collect()
    }

    pub fn social_links(&self) -> Vec<D::Node> {
        self.query_all(&self.controller.config().markers.social_links)
    }

    /// First trigger carrying `id` (compared literally, never via a selector)
    pub fn find_trigger(&self, id: &ProjectId) -> Option<D::Node> {
        let dom = self.dom();
        let marker = &self.controller.config().markers.trigger_attr;
        self.triggers()
            .into_iter()
            .find(|t| dom.attribute(t, marker).as_deref() == Some(id.as_str()))
    }

    fn query_all(&self, selector: &str) -> Vec<D::Node> {
        self.dom().query_all(selector).unwrap_or_else(|e| {
            log::warn!("[boot] {}", e);
            Vec::new()
        })
    }

    // === Event handlers ===

    /// A trigger was clicked: open its project and record it in history
    pub fn on_trigger_click(&self, trigger: &D::Node) -> Option<Transition> {
        let marker = &self.controller.config().markers.trigger_attr;
        let id = match self.dom().attribute(trigger, marker) {
            Some(id) if !id.is_empty() => ProjectId::new(id),
            _ => return None,
        };
        if self.is_showing(&id) {
            return None;
        }

        let dispatch = self.controller.open_project(TransitionRequest {
            project_id: id.clone(),
            trigger: trigger.clone(),
            is_initial_load: false,
        });
        self.navigator
            .push_state(&HistoryEntry::project(id.clone()), &routing::project_url(self.param(), &id));
        dispatch.into_transition()
    }

    /// The back control was clicked
    pub fn on_back_click(&self) -> Option<Transition> {
        match self.controller.close_project() {
            Ok(dispatch) => {
                self.navigator
                    .push_state(&HistoryEntry::home(), routing::HOME_URL);
                dispatch.into_transition()
            }
            Err(e) => {
                log::debug!("[boot] back ignored: {}", e);
                None
            }
        }
    }

    /// Back/forward navigation restored `entry` (`None` when the entry has
    /// no payload)
    ///
    /// A payload without a project id falls back to the id in the current
    /// URL, so the landing entry of a deep link still shows its project.
    pub fn on_pop_state(&self, entry: Option<HistoryEntry>) -> Option<Transition> {
        let id = entry
            .and_then(|e| e.project_id)
            .or_else(|| routing::project_from_location(self.navigator.as_ref(), self.param()));

        match id {
            Some(id) => {
                if self.is_showing(&id) {
                    return None;
                }
                let trigger = match self.find_trigger(&id) {
                    Some(trigger) => trigger,
                    None => {
                        log::debug!("[boot] history names unknown project {}", id);
                        return None;
                    }
                };
                self.controller
                    .open_project(TransitionRequest {
                        project_id: id,
                        trigger,
                        is_initial_load: true,
                    })
                    .into_transition()
            }
            None => match self.controller.close_project() {
                Ok(dispatch) => dispatch.into_transition(),
                Err(_) => None,
            },
        }
    }

    /// An in-page anchor was clicked; returns whether a target was scrolled to
    ///
    /// Invalid selectors (e.g. a bare `#`) are swallowed.
    pub fn on_anchor_click(&self, href: &str) -> bool {
        match self.dom().query(href) {
            Ok(Some(target)) => {
                self.dom().scroll_into_view(&target);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::debug!("[boot] anchor not scrollable: {}", e);
                false
            }
        }
    }

    /// Pointer entered or left a social link
    pub fn on_social_hover(&self, link: &D::Node, entering: bool) {
        let hover = self.controller.config().motion.hover;
        let tween = if entering {
            Tween::new().scale(hover.scale).rotation(hover.rotation)
        } else {
            Tween::new().scale(1.0).rotation(0.0)
        };
        let timing = Timing::new(hover.duration, &self.controller.config().motion.ease);
        drop(
            self.controller
                .animator()
                .to(std::slice::from_ref(link), &tween, &timing),
        );
    }

    /// Resolve a project named by the initial URL
    ///
    /// Returns `None` when the URL names no project or no trigger carries
    /// the id. Otherwise the current history entry is stamped with the
    /// project payload and the returned task opens the project, without the
    /// home exit, after the configured delay.
    pub fn deep_link(&self) -> Option<LocalBoxFuture<'static, ()>> {
        let id = routing::project_from_location(self.navigator.as_ref(), self.param())?;
        let trigger = match self.find_trigger(&id) {
            Some(trigger) => trigger,
            None => {
                log::debug!("[boot] deep link to unknown project {}", id);
                return None;
            }
        };

        self.navigator
            .replace_state(&HistoryEntry::project(id.clone()), &routing::project_url(self.param(), &id));

        log::info!("[boot] deep link to project {}", id);
        let delay = self.clock.sleep(self.controller.config().deep_link_delay_ms);
        let controller = self.controller.clone();
        Some(Box::pin(async move {
            delay.await;
            let dispatch = controller.open_project(TransitionRequest {
                project_id: id,
                trigger,
                is_initial_load: true,
            });
            if let Dispatch::Started(transition) = dispatch {
                transition.await;
            }
        }))
    }

    /// Open a project by id as if its trigger had been clicked
    pub fn open_by_id(&self, id: &ProjectId) -> Result<Option<Transition>, TransitionError> {
        let trigger = self
            .find_trigger(id)
            .ok_or_else(|| TransitionError::UnknownProject(id.clone()))?;
        Ok(self.on_trigger_click(&trigger))
    }

    /// Settled on (or heading to) this very project
    fn is_showing(&self, id: &ProjectId) -> bool {
        self.controller.in_project_view()
            && !self.controller.has_pending()
            && self.controller.current_project().as_ref() == Some(id)
    }
}
