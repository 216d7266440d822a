//! Issued-but-ignorable async work.
//!
//! A collaborator call cannot be aborted once issued, so each one runs as its
//! own task. Its owner awaits it against a teardown token; after teardown the
//! result is dropped and no state transition follows.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    token: CancellationToken,
}

/// Tears down a [`TaskScope`] from outside its owner.
#[derive(Debug, Clone)]
pub struct TeardownHandle {
    token: CancellationToken,
}

impl TeardownHandle {
    pub fn teardown(&self) {
        self.token.cancel();
    }
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` to completion in the background and hand back its output,
    /// or `None` if the scope was torn down before or while it ran.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.token.is_cancelled() {
            debug!("Scope torn down, not issuing call");
            return None;
        }
        let handle = tokio::spawn(fut);
        tokio::select! {
            biased;
            () = self.token.cancelled() => {
                debug!("Discarding completion after teardown");
                None
            }
            joined = handle => match joined {
                Ok(output) if !self.token.is_cancelled() => Some(output),
                Ok(_) => None,
                Err(e) => {
                    error!(error = %e, "Collaborator task failed");
                    None
                }
            },
        }
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    #[must_use]
    pub fn handle(&self) -> TeardownHandle {
        TeardownHandle {
            token: self.token.clone(),
        }
    }

    /// Resolves once the scope is torn down.
    pub async fn torn_down(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn returns_output_while_live() {
        let scope = TaskScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn teardown_discards_in_flight_completion() {
        let scope = TaskScope::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let handle = scope.handle();
        let run = scope.run(async move {
            let _ = release_rx.await;
            flag.store(true, Ordering::SeqCst);
            "written"
        });
        let (output, ()) = tokio::join!(run, async move {
            handle.teardown();
        });
        assert_eq!(output, None);

        // The issued call still runs to completion; only its result is ignored.
        release_tx.send(()).unwrap();
        for _ in 0..100 {
            if finished.load(Ordering::SeqCst) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn nothing_is_issued_after_teardown() {
        let scope = TaskScope::new();
        scope.teardown();
        let issued = Arc::new(AtomicBool::new(false));
        let flag = issued.clone();
        let out = scope
            .run(async move {
                flag.store(true, Ordering::SeqCst);
            })
            .await;
        assert!(out.is_none());
        tokio::task::yield_now().await;
        assert!(!issued.load(Ordering::SeqCst));
        assert!(scope.is_torn_down());
    }
}
