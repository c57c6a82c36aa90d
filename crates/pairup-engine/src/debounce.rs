//! Coalesces whole-document replacements within a quiet window.
//!
//! Used on the path where the editor sends a full-sync `didChange` (a
//! content change with no range). The first change arms the timer;
//! additional changes replace the pending item and restart the timer; once
//! `interval` elapses with nothing new, the pending item fires.
//!
//! The pending slot is global, not keyed by filename — a change to file B
//! replaces a still-pending change to file A. This mirrors the source
//! behavior; see the crate-level open question on upgrading it to a
//! per-filename slot.

use std::time::Duration;

use tokio::sync::mpsc;

/// Default quiet window before a pending whole-document replacement fires.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// A pending whole-document replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// The file being replaced.
    pub filename: String,
    /// The new full document contents.
    pub text: String,
}

/// Debounces a stream of [`TextChange`] values down to the most recent one
/// per quiet window.
pub struct Debouncer {
    sender: mpsc::UnboundedSender<TextChange>,
}

impl Debouncer {
    /// Spawn a debouncer with the given quiet window. `on_fire` runs on the
    /// debouncer's background task each time a quiet window elapses.
    pub fn new(interval: Duration, mut on_fire: impl FnMut(TextChange) + Send + 'static) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<TextChange>();

        tokio::spawn(async move {
            let Some(mut pending) = receiver.recv().await else {
                return;
            };
            loop {
                tokio::select! {
                    next = receiver.recv() => {
                        match next {
                            Some(next) => pending = next,
                            None => {
                                on_fire(pending);
                                return;
                            }
                        }
                    }
                    _ = tokio::time::sleep(interval) => {
                        on_fire(pending);
                        let Some(next) = receiver.recv().await else {
                            return;
                        };
                        pending = next;
                    }
                }
            }
        });

        Self { sender }
    }

    /// Spawn a debouncer with the default 200ms quiet window.
    pub fn with_default_interval(on_fire: impl FnMut(TextChange) + Send + 'static) -> Self {
        Self::new(DEFAULT_INTERVAL, on_fire)
    }

    /// Push a new change, superseding any still-pending one and restarting
    /// the quiet window.
    pub fn push(&self, change: TextChange) {
        // The receiving task outliving every sender clone is the only way
        // this can fail; dropping the change is the right response either way.
        let _ = self.sender.send(change);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_change_within_the_window_supersedes_the_first() {
        let fired: Arc<Mutex<Vec<TextChange>>> = Arc::new(Mutex::new(Vec::new()));
        let fired_clone = fired.clone();
        let debouncer = Debouncer::new(Duration::from_millis(200), move |change| {
            fired_clone.lock().push(change);
        });

        debouncer.push(TextChange { filename: "a.txt".into(), text: "first".into() });
        tokio::time::advance(Duration::from_millis(50)).await;
        debouncer.push(TextChange { filename: "a.txt".into(), text: "second".into() });

        tokio::time::advance(Duration::from_millis(250)).await;
        tokio::task::yield_now().await;

        let fired = fired.lock();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].text, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn unrelated_filenames_still_share_the_single_pending_slot() {
        let fired: Arc<Mutex<Vec<TextChange>>> = Arc::new(Mutex::new(Vec::new()));
        let fired_clone = fired.clone();
        let debouncer = Debouncer::new(Duration::from_millis(200), move |change| {
            fired_clone.lock().push(change);
        });

        debouncer.push(TextChange { filename: "a.txt".into(), text: "a".into() });
        debouncer.push(TextChange { filename: "b.txt".into(), text: "b".into() });

        tokio::time::advance(Duration::from_millis(250)).await;
        tokio::task::yield_now().await;

        let fired = fired.lock();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].filename, "b.txt");
    }
}
