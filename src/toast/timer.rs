use std::time::Duration;

use tokio::{runtime::Handle, task::JoinHandle, time::sleep};

/// A one-shot delayed callback running on a tokio runtime.
///
/// The callback is cancelled when the timer is dropped or [`cancel`]led
/// before it fires.
///
/// [`cancel`]: ExpiryTimer::cancel
#[derive(Debug)]
pub struct ExpiryTimer {
    task: JoinHandle<()>,
}

impl ExpiryTimer {
    /// Run `callback` once `after` has elapsed.
    pub fn schedule<F>(handle: &Handle, after: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let task = handle.spawn(async move {
            sleep(after).await;
            callback();
        });
        Self { task }
    }

    /// Prevent the callback from running if it has not fired yet.
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the callback has run or the task was aborted.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
