//! router::completion
//!
//! Single-resolution completion signal.
//!
//! The signal resolves at most once, and only after every requested resource
//! loaded. Waiters that subscribe after it resolved still observe it, so
//! late-loaded scripts never miss the event. If the router is dropped
//! without resolving, waiters observe `None`.

use tokio::sync::watch;

use crate::document::ScriptsLoaded;

/// Receiving side of the completion signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<Option<ScriptsLoaded>>,
}

impl Completion {
    /// The payload, if the signal has resolved.
    pub fn get(&self) -> Option<ScriptsLoaded> {
        self.rx.borrow().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the signal.
    ///
    /// Returns `None` if the router went away without completing (a failed
    /// load sequence keeps waiters pending for as long as the router lives).
    pub async fn wait(&self) -> Option<ScriptsLoaded> {
        let mut rx = self.rx.clone();
        // Bound so the `watch::Ref` borrow of `rx` ends before `rx` drops.
        let loaded = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| value.clone());
        loaded
    }
}

/// Sending side, owned by the router.
#[derive(Debug)]
pub(crate) struct CompletionSender {
    tx: watch::Sender<Option<ScriptsLoaded>>,
}

impl CompletionSender {
    pub(crate) fn channel() -> (Self, Completion) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, Completion { rx })
    }

    /// Resolve the signal. Returns `false` if it had already resolved.
    pub(crate) fn resolve(&self, event: ScriptsLoaded) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                false
            } else {
                *current = Some(event);
                true
            }
        })
    }

    pub(crate) fn subscribe(&self) -> Completion {
        Completion {
            rx: self.tx.subscribe(),
        }
    }
}
