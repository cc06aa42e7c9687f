//! Cancellable fixed-interval task.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Calls `on_tick` every `period` until it returns `Break(value)` or the task is
/// cancelled. The first tick fires immediately. Dropping the handle cancels it.
pub struct RepeatingTask<T> {
    cancel: CancellationToken,
    handle: Option<JoinHandle<Option<T>>>,
}

impl<T: Send + 'static> RepeatingTask<T> {
    pub fn spawn<F>(period: Duration, on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<T> + Send + 'static,
    {
        Self::spawn_with_token(period, CancellationToken::new(), on_tick)
    }

    /// Like [`spawn`](Self::spawn), stopping also when `cancel` fires.
    pub fn spawn_with_token<F>(period: Duration, cancel: CancellationToken, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<T> + Send + 'static,
    {
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return None,
                    _ = interval.tick() => {
                        if let ControlFlow::Break(value) = on_tick() {
                            return Some(value);
                        }
                    }
                }
            }
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the task to stop. `None` when it was cancelled.
    pub async fn join(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        handle.await.ok().flatten()
    }
}

impl<T> Drop for RepeatingTask<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
