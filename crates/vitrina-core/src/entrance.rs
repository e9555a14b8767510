//! Page-load entrance animation

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use vitrina_ports::{Animator, Clock, Dom, StaggerFrom, Tween};

use crate::config::PageConfig;

/// Reveals the top-level page regions once the document is ready
pub struct PageEntrance<D, A, C> {
    dom: Rc<D>,
    animator: Rc<A>,
    clock: Rc<C>,
    config: Rc<PageConfig>,
}

impl<D, A, C> PageEntrance<D, A, C>
where
    D: Dom + 'static,
    A: Animator<D::Node> + 'static,
    C: Clock + 'static,
{
    pub fn new(dom: Rc<D>, animator: Rc<A>, clock: Rc<C>, config: Rc<PageConfig>) -> Self {
        Self {
            dom,
            animator,
            clock,
            config,
        }
    }

    /// Regions to reveal, in order, without duplicates
    ///
    /// Skips anything inside the project-detail container and anything not
    /// currently rendered.
    pub fn targets(&self) -> Vec<D::Node> {
        let dom = &self.dom;
        let project_space = dom.element_by_id(&self.config.ids.project_space);
        let mut targets: Vec<D::Node> = Vec::new();

        for selector in self.config.entrance_selectors() {
            let found = match dom.query_all(&selector) {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("[entrance] {}", e);
                    continue;
                }
            };
            for node in found {
                let in_project = project_space
                    .as_ref()
                    .is_some_and(|space| dom.contains(space, &node));
                if in_project || !dom.is_rendered(&node) || targets.contains(&node) {
                    continue;
                }
                targets.push(node);
            }
        }
        targets
    }

    /// Mark the main container ready, then animate the regions in on the
    /// next frame
    ///
    /// Silently does nothing beyond the ready mark when the animation engine
    /// is not loaded.
    pub fn play(self) -> LocalBoxFuture<'static, ()> {
        let markers = &self.config.markers;
        match self.dom.query_all(&markers.main_container) {
            Ok(containers) => {
                for container in containers {
                    self.dom.add_class(&container, &markers.ready_class);
                }
            }
            Err(e) => log::warn!("[entrance] {}", e),
        }

        let frame = self.clock.next_frame();
        Box::pin(async move {
            frame.await;
            if !self.animator.is_available() {
                log::debug!("[entrance] animation engine not loaded, skipping");
                return;
            }

            let targets = self.targets();
            if targets.is_empty() {
                return;
            }
            log::debug!("[entrance] revealing {} elements", targets.len());

            let motion = &self.config.motion;
            let preset = motion.entrance;
            self.animator.set(&targets, &preset.shifted_down());
            self.animator
                .to(
                    &targets,
                    &Tween::settled().clear_props(),
                    &preset.timing(&motion.ease, StaggerFrom::Start),
                )
                .await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use vitrina_ports_mock::{AnimationKind, MockAnimator, MockClock, MockDom, NodeId};

    fn page() -> (Rc<MockDom>, NodeId) {
        let dom = Rc::new(MockDom::new());
        let main = dom.append_element(dom.body(), "div", &[("class", "contenedor")]);
        dom.append_element(main, "div", &[("id", "logo")]);
        let nav = dom.append_element(main, "div", &[("id", "enlaces")]);
        dom.append_element(nav, "a", &[("href", "#trabajo")]);
        (dom, main)
    }

    fn entrance(
        dom: &Rc<MockDom>,
        animator: &Rc<MockAnimator<NodeId>>,
    ) -> PageEntrance<MockDom, MockAnimator<NodeId>, MockClock> {
        PageEntrance::new(
            Rc::clone(dom),
            Rc::clone(animator),
            Rc::new(MockClock::new()),
            Rc::new(PageConfig::default()),
        )
    }

    #[test]
    fn test_marks_container_and_animates() {
        let (dom, main) = page();
        let animator = Rc::new(MockAnimator::new());
        block_on(entrance(&dom, &animator).play());

        assert!(dom.has_class(&main, "visible"));
        let calls = animator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, AnimationKind::Set);
        assert_eq!(calls[0].to.opacity, Some(0.0));
        assert_eq!(calls[1].kind, AnimationKind::To);
        assert!(calls[1].to.clear_props);
        assert_eq!(calls[0].targets, calls[1].targets);
    }

    #[test]
    fn test_missing_engine_is_noop() {
        let (dom, main) = page();
        let animator = Rc::new(MockAnimator::unavailable());
        block_on(entrance(&dom, &animator).play());

        assert!(dom.has_class(&main, "visible"));
        assert_eq!(animator.call_count(), 0);
    }

    #[test]
    fn test_targets_skip_hidden_and_project_space() {
        let (dom, main) = page();
        let footer = dom.append_element(main, "footer", &[("id", "pie")]);
        dom.set_style(&footer, "display", "none");
        let space = dom.append_element(dom.body(), "section", &[("id", "espacio-proyecto")]);
        let inner_logo_link = dom.append_element(space, "div", &[("class", "hero")]);
        dom.append_element(inner_logo_link, "p", &[]);

        let animator = Rc::new(MockAnimator::new());
        let targets = entrance(&dom, &animator).targets();
        assert_eq!(targets.len(), 2);
        assert!(!targets.contains(&footer));
        assert!(targets.iter().all(|n| !dom.contains(&space, n)));
    }
}
