//! Recording mock animation engine

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use vitrina_ports::{Animator, Completion, CompletionSignal, Timing, Tween};

/// Kind of engine call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    Set,
    To,
    FromTo,
}

/// One recorded engine call
#[derive(Clone, Debug)]
pub struct AnimationCall<N> {
    pub kind: AnimationKind,
    pub targets: Vec<N>,
    /// Start style (only for `FromTo`)
    pub from: Option<Tween>,
    pub to: Tween,
    /// `None` for `Set`
    pub timing: Option<Timing>,
}

/// Mock animator for unit testing
///
/// In automatic mode every tween completes as soon as it is issued. In
/// manual mode completions queue up until the test releases them with
/// [`complete_next`](Self::complete_next) or
/// [`complete_all`](Self::complete_all), which lets tests observe the
/// controller while it is suspended mid-transition.
pub struct MockAnimator<N> {
    available: Cell<bool>,
    manual: bool,
    calls: RefCell<Vec<AnimationCall<N>>>,
    pending: RefCell<VecDeque<CompletionSignal>>,
}

impl<N: Clone> MockAnimator<N> {
    /// Animator whose tweens complete immediately
    pub fn new() -> Self {
        Self {
            available: Cell::new(true),
            manual: false,
            calls: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Animator whose tweens complete only when released by the test
    pub fn manual() -> Self {
        Self {
            manual: true,
            ..Self::new()
        }
    }

    /// Animator reporting the engine as not loaded
    pub fn unavailable() -> Self {
        let animator = Self::new();
        animator.available.set(false);
        animator
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// All recorded calls, in issue order
    pub fn calls(&self) -> Vec<AnimationCall<N>> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Forget recorded calls (pending completions are kept)
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Completions issued but not yet released
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Release the oldest pending completion
    ///
    /// Returns false when nothing is pending.
    pub fn complete_next(&self) -> bool {
        let signal = self.pending.borrow_mut().pop_front();
        match signal {
            Some(signal) => {
                signal.complete();
                true
            }
            None => false,
        }
    }

    /// Release every pending completion; returns how many were released
    pub fn complete_all(&self) -> usize {
        let signals: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let count = signals.len();
        for signal in signals {
            signal.complete();
        }
        count
    }

    fn record(&self, call: AnimationCall<N>) -> Completion {
        let timed = call.timing.is_some();
        self.calls.borrow_mut().push(call);
        if !timed || !self.manual {
            return Completion::ready();
        }
        let (signal, completion) = Completion::pair();
        self.pending.borrow_mut().push_back(signal);
        completion
    }
}

impl<N: Clone> Default for MockAnimator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> Animator<N> for MockAnimator<N> {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn set(&self, targets: &[N], tween: &Tween) {
        let _ = self.record(AnimationCall {
            kind: AnimationKind::Set,
            targets: targets.to_vec(),
            from: None,
            to: tween.clone(),
            timing: None,
        });
    }

    fn to(&self, targets: &[N], tween: &Tween, timing: &Timing) -> Completion {
        self.record(AnimationCall {
            kind: AnimationKind::To,
            targets: targets.to_vec(),
            from: None,
            to: tween.clone(),
            timing: Some(timing.clone()),
        })
    }

    fn from_to(&self, targets: &[N], from: &Tween, to: &Tween, timing: &Timing) -> Completion {
        self.record(AnimationCall {
            kind: AnimationKind::FromTo,
            targets: targets.to_vec(),
            from: Some(from.clone()),
            to: to.clone(),
            timing: Some(timing.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automatic_mode_completes_immediately() {
        let animator: MockAnimator<u32> = MockAnimator::new();
        let mut done = animator.to(&[1, 2], &Tween::new().opacity(0.0), &Timing::new(0.3, "none"));
        assert!(done.is_resolved());
        assert_eq!(animator.pending_count(), 0);
        assert_eq!(animator.calls()[0].targets, vec![1, 2]);
    }

    #[test]
    fn test_manual_mode_holds_completion() {
        let animator: MockAnimator<u32> = MockAnimator::manual();
        let mut done = animator.to(&[1], &Tween::new().opacity(0.0), &Timing::new(0.3, "none"));
        assert!(!done.is_resolved());
        assert_eq!(animator.pending_count(), 1);
        assert!(animator.complete_next());
        assert!(done.is_resolved());
        assert!(!animator.complete_next());
    }

    #[test]
    fn test_set_is_recorded_without_pending() {
        let animator: MockAnimator<u32> = MockAnimator::manual();
        animator.set(&[3], &Tween::settled());
        assert_eq!(animator.call_count(), 1);
        assert_eq!(animator.calls()[0].kind, AnimationKind::Set);
        assert_eq!(animator.pending_count(), 0);
    }
}
