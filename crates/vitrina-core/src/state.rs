//! View state

/// Which view is shown, or being switched to
///
/// `Home` and `Project` are settled; the other two hold while exit
/// animations run. The view counts as "in project view" from the moment a
/// project is requested until a close is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Home,
    TransitioningToProject,
    Project,
    TransitioningToHome,
}

impl ViewPhase {
    pub fn in_project_view(&self) -> bool {
        matches!(self, ViewPhase::TransitioningToProject | ViewPhase::Project)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(
            self,
            ViewPhase::TransitioningToProject | ViewPhase::TransitioningToHome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_home() {
        let phase = ViewPhase::default();
        assert_eq!(phase, ViewPhase::Home);
        assert!(!phase.in_project_view());
        assert!(!phase.is_transitioning());
    }

    #[test]
    fn test_flag_flips_at_transition_start() {
        assert!(ViewPhase::TransitioningToProject.in_project_view());
        assert!(!ViewPhase::TransitioningToHome.in_project_view());
        assert!(ViewPhase::TransitioningToHome.is_transitioning());
        assert!(!ViewPhase::Project.is_transitioning());
    }
}
