//! Mock clock

use std::cell::{Cell, RefCell};

use vitrina_ports::{Clock, Completion};

/// Clock whose delays resolve immediately, recording what was requested
#[derive(Debug, Default)]
pub struct MockClock {
    sleeps: RefCell<Vec<u32>>,
    frames: Cell<usize>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested delays in milliseconds, in call order
    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }

    /// Number of next-frame requests
    pub fn frames(&self) -> usize {
        self.frames.get()
    }
}

impl Clock for MockClock {
    fn sleep(&self, ms: u32) -> Completion {
        self.sleeps.borrow_mut().push(ms);
        Completion::ready()
    }

    fn next_frame(&self) -> Completion {
        self.frames.set(self.frames.get() + 1);
        Completion::ready()
    }
}
