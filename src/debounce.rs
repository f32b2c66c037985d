//! Trailing-edge debouncer on the tokio timer.
//!
//! Every [`Debouncer::trigger`] cancels the pending call and schedules a new
//! one `delay` out with the latest value. At most one call is ever pending.
//! Dropping the debouncer cancels the pending call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, value: T) {
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;

        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(value);
        }));
    }

    /// Drops the scheduled call, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.lock_pending()
            .take()
            .is_some_and(|handle| {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // The guarded value is a plain handle; a poisoned lock still holds a usable one.
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: String| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_value() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(500), callback);

        for term in ["b", "ba", "bat", "batm", "batman"] {
            debouncer.trigger(term.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["batman".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(500), callback);

        debouncer.trigger("dune".to_string());
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.trigger("alien".to_string());
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["dune".to_string(), "alien".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_release_the_timer() {
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(500), move |(): ()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.trigger(());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        debouncer.trigger(());
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_still_goes_through_scheduler() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::ZERO, callback);

        debouncer.trigger(String::new());
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(*seen.lock().unwrap(), vec![String::new()]);
    }
}
