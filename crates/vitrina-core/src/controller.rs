//! View-transition controller
//!
//! Owns the view state and sequences every switch between home and a
//! project detail:
//!
//! - **open**: footer exit → home exit (both awaited, skipped on initial
//!   load) → swap containers → build fragment → detail enter (not awaited)
//! - **close**: detail exit in reverse order (awaited) → swap containers →
//!   home and footer enter (not awaited)
//!
//! The phase flips synchronously when a request is accepted, before any
//! animation runs. A request that arrives while another transition is
//! suspended is parked in a single pending slot (latest wins) and runs as
//! soon as the current transition settles, so the final view always
//! matches the last request.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use vitrina_ports::{Animator, Completion, Dom, ProjectId, StaggerFrom, Timing, Tween};

use crate::config::PageConfig;
use crate::content::ProjectContentBuilder;
use crate::error::TransitionError;
use crate::state::ViewPhase;

/// A running transition; resolves once its enter animation has been issued
pub type Transition = LocalBoxFuture<'static, ()>;

/// Request to show a project
#[derive(Clone, Debug)]
pub struct TransitionRequest<N> {
    pub project_id: ProjectId,
    /// Element the request came from; its heading and link feed the title
    pub trigger: N,
    /// Skip the home exit animation (deep links, back/forward replay)
    pub is_initial_load: bool,
}

/// Outcome of an accepted request
#[must_use = "a started transition does nothing unless driven"]
pub enum Dispatch {
    /// The transition began; drive the future to run it
    Started(Transition),
    /// Another transition is in flight; this request runs after it
    Queued,
}

impl Dispatch {
    pub fn into_transition(self) -> Option<Transition> {
        match self {
            Dispatch::Started(transition) => Some(transition),
            Dispatch::Queued => None,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, Dispatch::Queued)
    }
}

enum PendingRequest<N> {
    Open(TransitionRequest<N>),
    Close,
}

struct ControllerState<N> {
    phase: ViewPhase,
    current: Option<ProjectId>,
    pending: Option<PendingRequest<N>>,
}

struct Inner<D: Dom, A> {
    dom: Rc<D>,
    animator: Rc<A>,
    config: Rc<PageConfig>,
    builder: ProjectContentBuilder,
    state: RefCell<ControllerState<D::Node>>,
}

/// Sole owner and writer of the view state
///
/// Cloning yields another handle to the same controller.
pub struct ViewTransitionController<D: Dom, A> {
    inner: Rc<Inner<D, A>>,
}

impl<D: Dom, A> Clone for ViewTransitionController<D, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D, A> ViewTransitionController<D, A>
where
    D: Dom + 'static,
    A: Animator<D::Node> + 'static,
{
    pub fn new(dom: Rc<D>, animator: Rc<A>, config: Rc<PageConfig>) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom,
                animator,
                builder: ProjectContentBuilder::new(Rc::clone(&config)),
                config,
                state: RefCell::new(ControllerState {
                    phase: ViewPhase::Home,
                    current: None,
                    pending: None,
                }),
            }),
        }
    }

    pub fn dom(&self) -> &Rc<D> {
        &self.inner.dom
    }

    pub fn animator(&self) -> &Rc<A> {
        &self.inner.animator
    }

    pub fn config(&self) -> &Rc<PageConfig> {
        &self.inner.config
    }

    pub fn phase(&self) -> ViewPhase {
        self.inner.state.borrow().phase
    }

    /// True from the moment a project is requested until a close is requested
    pub fn in_project_view(&self) -> bool {
        self.phase().in_project_view()
    }

    /// Project most recently opened, while in project view
    pub fn current_project(&self) -> Option<ProjectId> {
        self.inner.state.borrow().current.clone()
    }

    /// Whether a request is parked behind the running transition
    pub fn has_pending(&self) -> bool {
        self.inner.state.borrow().pending.is_some()
    }

    /// Show a project
    pub fn open_project(&self, request: TransitionRequest<D::Node>) -> Dispatch {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.phase.is_transitioning() {
                log::debug!(
                    "[view] queueing project {} behind running transition",
                    request.project_id
                );
                state.pending = Some(PendingRequest::Open(request));
                return Dispatch::Queued;
            }
            state.phase = ViewPhase::TransitioningToProject;
            state.current = Some(request.project_id.clone());
        }

        log::debug!(
            "[view] opening project {} (initial load: {})",
            request.project_id,
            request.is_initial_load
        );
        let this = self.clone();
        Dispatch::Started(Box::pin(async move {
            this.run_open(request).await;
            this.settle(ViewPhase::Project).await;
        }))
    }

    /// Return to the home view
    ///
    /// A close already queued behind a running transition counts as home
    /// being restored, so repeated requests are rejected rather than queued
    /// again.
    pub fn close_project(&self) -> Result<Dispatch, TransitionError> {
        {
            let mut state = self.inner.state.borrow_mut();
            let restoring = match state.phase {
                ViewPhase::Home => true,
                ViewPhase::TransitioningToHome => state.pending.is_none(),
                ViewPhase::TransitioningToProject | ViewPhase::Project => false,
            };
            if restoring || matches!(state.pending, Some(PendingRequest::Close)) {
                return Err(TransitionError::AlreadyHome);
            }
            if state.phase.is_transitioning() {
                log::debug!("[view] queueing close behind running transition");
                state.pending = Some(PendingRequest::Close);
                return Ok(Dispatch::Queued);
            }
            state.phase = ViewPhase::TransitioningToHome;
            state.current = None;
        }

        log::debug!("[view] closing project view");
        let this = self.clone();
        Ok(Dispatch::Started(Box::pin(async move {
            this.run_close().await;
            this.settle(ViewPhase::Home).await;
        })))
    }

    /// Enter a settled phase, then run whatever was queued meanwhile
    async fn settle(&self, phase: ViewPhase) {
        let pending = {
            let mut state = self.inner.state.borrow_mut();
            state.phase = phase;
            state.pending.take()
        };

        let next = match pending {
            Some(PendingRequest::Open(request)) => Some(self.open_project(request)),
            Some(PendingRequest::Close) => match self.close_project() {
                Ok(dispatch) => Some(dispatch),
                Err(e) => {
                    log::debug!("[view] dropping queued close: {}", e);
                    None
                }
            },
            None => None,
        };

        if let Some(Dispatch::Started(transition)) = next {
            transition.await;
        }
    }

    async fn run_open(&self, request: TransitionRequest<D::Node>) {
        if !request.is_initial_load {
            self.play_home_exit().await;
        }

        self.show_project_space();

        let dom = &self.inner.dom;
        let ids = &self.inner.config.ids;
        let content = match dom.element_by_id(&ids.project_content) {
            Some(container) => {
                self.inner
                    .builder
                    .build(dom.as_ref(), &container, &request.project_id, &request.trigger);
                dom.children(&container)
            }
            None => {
                log::warn!("[view] #{} not found, nothing to build", ids.project_content);
                Vec::new()
            }
        };

        let mut targets: Vec<D::Node> = dom.element_by_id(&ids.back).into_iter().collect();
        targets.extend(content);
        let motion = &self.inner.config.motion;
        let preset = motion.detail_enter;
        drop(self.tween_from_to(
            &targets,
            &preset.shifted_left(),
            &Tween::settled(),
            &preset.timing(&motion.ease, StaggerFrom::Start),
        ));
    }

    async fn run_close(&self) {
        let dom = &self.inner.dom;
        let ids = &self.inner.config.ids;
        let motion = &self.inner.config.motion;

        let mut targets: Vec<D::Node> = dom.element_by_id(&ids.back).into_iter().collect();
        if let Some(container) = dom.element_by_id(&ids.project_content) {
            targets.extend(dom.children(&container));
        }
        let preset = motion.detail_exit;
        self.tween_to(
            &targets,
            &preset.shifted_left(),
            &preset.timing(&motion.ease, StaggerFrom::End),
        )
        .await;

        self.show_home();

        let preset = motion.home_enter;
        drop(self.tween_from_to(
            &self.home_targets(),
            &preset.shifted_left(),
            &Tween::settled(),
            &preset.timing(&motion.ease, StaggerFrom::Start),
        ));
        let preset = motion.footer_enter;
        let footer: Vec<D::Node> = dom.element_by_id(&ids.footer).into_iter().collect();
        drop(self.tween_from_to(
            &footer,
            &preset.shifted_down(),
            &Tween::settled(),
            &preset.timing(&motion.ease, StaggerFrom::Start),
        ));
    }

    /// Footer out, then the home content and project list out
    async fn play_home_exit(&self) {
        let motion = &self.inner.config.motion;
        let footer: Vec<D::Node> = self
            .inner
            .dom
            .element_by_id(&self.inner.config.ids.footer)
            .into_iter()
            .collect();

        let preset = motion.footer_exit;
        self.tween_to(
            &footer,
            &preset.shifted_down(),
            &preset.timing(&motion.ease, StaggerFrom::Start),
        )
        .await;

        let preset = motion.home_exit;
        self.tween_to(
            &self.home_targets(),
            &preset.shifted_left(),
            &preset.timing(&motion.ease, StaggerFrom::Start),
        )
        .await;
    }

    /// Direct children of the home region except the nav bar, then the
    /// project list items
    fn home_targets(&self) -> Vec<D::Node> {
        let dom = &self.inner.dom;
        let config = &self.inner.config;
        let mut targets = Vec::new();

        if let Some(home) = dom.element_by_id(&config.ids.home) {
            targets.extend(
                dom.children(&home)
                    .into_iter()
                    .filter(|child| dom.tag_name(child) != config.markers.nav_tag),
            );
        }
        match dom.query_all(&config.project_items_selector()) {
            Ok(items) => {
                for item in items {
                    if !targets.contains(&item) {
                        targets.push(item);
                    }
                }
            }
            Err(e) => log::warn!("[view] {}", e),
        }
        targets
    }

    fn show_project_space(&self) {
        let dom = &self.inner.dom;
        let ids = &self.inner.config.ids;
        if let Some(home) = dom.element_by_id(&ids.home) {
            dom.set_style(&home, "display", "none");
        }
        if let Some(space) = dom.element_by_id(&ids.project_space) {
            dom.remove_class(&space, &self.inner.config.markers.hidden_class);
        }
    }

    fn show_home(&self) {
        let dom = &self.inner.dom;
        let ids = &self.inner.config.ids;
        if let Some(space) = dom.element_by_id(&ids.project_space) {
            dom.add_class(&space, &self.inner.config.markers.hidden_class);
        }
        if let Some(home) = dom.element_by_id(&ids.home) {
            dom.set_style(&home, "display", "block");
        }
    }

    /// Empty target lists complete immediately without reaching the engine
    fn tween_to(&self, targets: &[D::Node], tween: &Tween, timing: &Timing) -> Completion {
        if targets.is_empty() {
            return Completion::ready();
        }
        self.inner.animator.to(targets, tween, timing)
    }

    fn tween_from_to(
        &self,
        targets: &[D::Node],
        from: &Tween,
        to: &Tween,
        timing: &Timing,
    ) -> Completion {
        if targets.is_empty() {
            return Completion::ready();
        }
        self.inner.animator.from_to(targets, from, to, timing)
    }
}
