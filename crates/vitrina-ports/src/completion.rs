//! One-shot completion notifications
//!
//! Animation engines and timers report completion through callbacks. A
//! [`CompletionSignal`] is handed to the callback side; the paired
//! [`Completion`] is an awaitable that resolves exactly once.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::channel::oneshot;

/// Awaitable side of a completion pair
///
/// Resolves when the paired signal fires or is dropped. A dropped signal
/// means the producer gave up (e.g. the engine rejected the call); the
/// waiter proceeds as if the work had finished.
#[derive(Debug)]
#[must_use = "a Completion does nothing unless awaited; drop it explicitly for fire-and-forget"]
pub struct Completion {
    rx: Option<oneshot::Receiver<()>>,
}

/// Firing side of a completion pair
#[derive(Debug)]
pub struct CompletionSignal {
    tx: oneshot::Sender<()>,
}

impl Completion {
    /// Create a connected signal/completion pair
    pub fn pair() -> (CompletionSignal, Completion) {
        let (tx, rx) = oneshot::channel();
        (CompletionSignal { tx }, Completion { rx: Some(rx) })
    }

    /// A completion that is already resolved
    pub fn ready() -> Self {
        Self { rx: None }
    }

    /// Check without blocking whether the completion has resolved
    pub fn is_resolved(&mut self) -> bool {
        match self.rx.as_mut() {
            None => true,
            Some(rx) => match rx.try_recv() {
                Ok(Some(())) | Err(_) => {
                    self.rx = None;
                    true
                }
                Ok(None) => false,
            },
        }
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let rx = match self.rx.as_mut() {
            Some(rx) => rx,
            None => return Poll::Ready(()),
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(_) => {
                self.rx = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl CompletionSignal {
    /// Resolve the paired completion
    pub fn complete(self) {
        // The waiter may already be gone (fire-and-forget); that's fine.
        let _ = self.tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_ready_resolves_immediately() {
        block_on(Completion::ready());
    }

    #[test]
    fn test_signal_resolves_completion() {
        let (signal, mut completion) = Completion::pair();
        assert!(!completion.is_resolved());
        signal.complete();
        assert!(completion.is_resolved());
        block_on(completion);
    }

    #[test]
    fn test_dropped_signal_resolves_completion() {
        let (signal, completion) = Completion::pair();
        drop(signal);
        block_on(completion);
    }

    #[test]
    fn test_complete_after_waiter_dropped() {
        let (signal, completion) = Completion::pair();
        drop(completion);
        signal.complete();
    }
}
