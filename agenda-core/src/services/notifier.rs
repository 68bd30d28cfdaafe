//! Notifier - short-lived, auto-dismissing toast messages
//!
//! Only one dismissal timer exists at a time. A new toast cancels the pending
//! timer and starts its own, so the newest toast always decides when the
//! toast area hides.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{Severity, ToastState};

/// How long a toast stays visible unless told otherwise
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Toast scheduler
pub struct Notifier {
    state: Arc<watch::Sender<ToastState>>,
    pending: Mutex<Option<CancellationToken>>,
    default_duration: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION)
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        let (state, _) = watch::channel(ToastState::default());
        Self {
            state: Arc::new(state),
            pending: Mutex::new(None),
            default_duration,
        }
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Observe toast changes
    pub fn subscribe(&self) -> watch::Receiver<ToastState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ToastState {
        self.state.borrow().clone()
    }

    /// Show `message` now and hide it after `duration` (default when `None`).
    ///
    /// Any pending dismissal from an earlier toast is cancelled first. The
    /// toast is visible by the time this returns. The timer needs a Tokio
    /// runtime; without one the toast stays up until [`dismiss`](Self::dismiss).
    pub fn notify(&self, message: impl Into<String>, severity: Severity, duration: Option<Duration>) {
        let duration = duration.unwrap_or(self.default_duration);
        let message = message.into();

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.cancel();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.visible = true;
            state.message = message;
            state.severity = severity;
        });
        debug!(%severity, generation, ?duration, "toast shown");

        *pending = schedule_dismissal(Arc::clone(&self.state), generation, duration);
    }

    pub fn success(&self, message: impl Into<String>, duration: Option<Duration>) {
        self.notify(message, Severity::Success, duration);
    }

    pub fn error(&self, message: impl Into<String>, duration: Option<Duration>) {
        self.notify(message, Severity::Error, duration);
    }

    pub fn info(&self, message: impl Into<String>, duration: Option<Duration>) {
        self.notify(message, Severity::Info, duration);
    }

    /// Hide the current toast immediately and drop its timer
    pub fn dismiss(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
        self.state.send_if_modified(|state| {
            state.generation += 1;
            std::mem::replace(&mut state.visible, false)
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = pending.take() {
            token.cancel();
        }
    }
}

/// Spawn the single-shot dismissal timer for toast `generation`.
///
/// The returned token cancels it. A timer that fires after a newer toast
/// was shown changes nothing.
fn schedule_dismissal(
    state: Arc<watch::Sender<ToastState>>,
    generation: u64,
    delay: Duration,
) -> Option<CancellationToken> {
    let Ok(handle) = Handle::try_current() else {
        warn!("no async runtime available; toast will not auto-dismiss");
        return None;
    };

    let token = CancellationToken::new();
    let cancelled = token.clone();
    handle.spawn(async move {
        tokio::select! {
            _ = cancelled.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                let hidden = state.send_if_modified(|state| {
                    if state.generation != generation || !state.visible {
                        return false;
                    }
                    state.visible = false;
                    true
                });
                if hidden {
                    debug!(generation, "toast dismissed");
                }
            }
        }
    });
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_is_visible_immediately() {
        let notifier = Notifier::new();
        notifier.success("Transfer scheduled", None);

        let state = notifier.snapshot();
        assert!(state.visible);
        assert_eq!(state.message, "Transfer scheduled");
        assert_eq!(state.severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_hides_after_default_duration() {
        let notifier = Notifier::new();
        notifier.info("Loading", None);

        tokio::time::sleep(ms(2999)).await;
        assert!(notifier.snapshot().visible);

        tokio::time::sleep(ms(2)).await;
        let state = notifier.snapshot();
        assert!(!state.visible);
        // Content is left as it was
        assert_eq!(state.message, "Loading");
        assert_eq!(state.severity, Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration() {
        let notifier = Notifier::new();
        notifier.error("Failed", Some(ms(500)));

        tokio::time::sleep(ms(499)).await;
        assert!(notifier.snapshot().visible);
        tokio::time::sleep(ms(2)).await;
        assert!(!notifier.snapshot().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_toast_replaces_timer() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                log.lock().unwrap().push(rx.borrow_and_update().visible);
            }
        });

        notifier.info("first", Some(ms(3000)));
        tokio::time::sleep(ms(1000)).await;
        notifier.error("second", Some(ms(3000)));

        // The first toast's deadline passes without hiding anything
        tokio::time::sleep(ms(2500)).await;
        let state = notifier.snapshot();
        assert!(state.visible);
        assert_eq!(state.message, "second");

        // The second toast's deadline hides it
        tokio::time::sleep(ms(600)).await;
        assert!(!notifier.snapshot().visible);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![true, true, false]);
        assert_eq!(seen.iter().filter(|visible| !**visible).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shorter_second_toast_governs() {
        let notifier = Notifier::new();
        notifier.info("long", Some(ms(5000)));
        notifier.info("short", Some(ms(100)));

        tokio::time::sleep(ms(101)).await;
        assert!(!notifier.snapshot().visible);
        assert_eq!(notifier.snapshot().message, "short");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_hides_and_cancels() {
        let notifier = Notifier::new();
        notifier.success("Saved", None);
        notifier.dismiss();
        assert!(!notifier.snapshot().visible);

        // A later toast is not hidden by the cancelled timer
        tokio::time::sleep(ms(1000)).await;
        notifier.info("Next", Some(ms(5000)));
        tokio::time::sleep(ms(2500)).await;
        assert!(notifier.snapshot().visible);
    }

    #[test]
    fn test_without_runtime_toast_stays_until_dismissed() {
        let notifier = Notifier::with_default_duration(ms(10));
        notifier.info("offline", None);
        assert!(notifier.snapshot().visible);
        notifier.dismiss();
        assert!(!notifier.snapshot().visible);
    }
}
