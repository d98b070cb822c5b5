//! Focus events derived from periodic active-window samples

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::application::ports::DesktopControl;
use crate::domain::focus::{FocusEvent, FocusRecord};
use crate::domain::timing::Interval;

const EVENT_BUFFER: usize = 32;

/// Samples the active window and reports focus edges.
///
/// A change of active window yields "resigned" for the previous window
/// followed by "became active" for the new one. Repeated samples of the
/// same window yield nothing.
pub struct FocusPoller<D: DesktopControl + ?Sized> {
    desktop: Arc<D>,
    interval: Interval,
    last: Option<FocusRecord>,
}

impl<D: DesktopControl + ?Sized + 'static> FocusPoller<D> {
    pub fn new(desktop: Arc<D>, interval: Interval) -> Self {
        Self {
            desktop,
            interval,
            last: None,
        }
    }

    /// Compare a sample against the previous one and return the edges
    pub fn observe(&mut self, sample: Option<FocusRecord>) -> Vec<FocusEvent> {
        if sample == self.last {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.last.take() {
            events.push(FocusEvent::resigned(previous));
        }
        if let Some(current) = sample.clone() {
            events.push(FocusEvent::activated(current));
        }
        self.last = sample;
        events
    }

    /// Start sampling in a background task.
    ///
    /// The task ends when the returned receiver is dropped.
    pub fn spawn(mut self) -> (mpsc::Receiver<FocusEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval.as_std());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut warned = false;

            loop {
                ticker.tick().await;

                let sample = match self.desktop.active_window().await {
                    Ok(sample) => {
                        warned = false;
                        sample
                    }
                    Err(e) => {
                        // Log once per failure streak
                        if !warned {
                            warn!(error = %e, "failed to query active window");
                            warned = true;
                        }
                        continue;
                    }
                };

                for event in self.observe(sample) {
                    if tx.send(event).await.is_err() {
                        debug!("focus event receiver dropped, stopping poller");
                        return;
                    }
                }
            }
        });

        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::DesktopError;
    use crate::domain::focus::WindowId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns queued samples, then the last one forever
    struct ScriptedDesktop {
        samples: Mutex<Vec<Option<FocusRecord>>>,
    }

    #[async_trait]
    impl DesktopControl for ScriptedDesktop {
        async fn active_window(&self) -> Result<Option<FocusRecord>, DesktopError> {
            let mut samples = self.samples.lock().unwrap();
            if samples.len() > 1 {
                Ok(samples.remove(0))
            } else {
                Ok(samples.first().cloned().flatten())
            }
        }

        async fn is_running(&self, _target: &FocusRecord) -> bool {
            true
        }

        async fn activate(&self, _target: &FocusRecord) -> Result<(), DesktopError> {
            Ok(())
        }
    }

    fn poller(samples: Vec<Option<FocusRecord>>) -> FocusPoller<ScriptedDesktop> {
        FocusPoller::new(
            Arc::new(ScriptedDesktop {
                samples: Mutex::new(samples),
            }),
            Interval::from_millis(1),
        )
    }

    fn window(app: &str, id: u64) -> FocusRecord {
        FocusRecord::new(app).with_window(WindowId::new(id))
    }

    #[test]
    fn same_window_produces_no_events() {
        let mut poller = poller(Vec::new());
        assert_eq!(poller.observe(Some(window("term", 1))).len(), 1);
        assert!(poller.observe(Some(window("term", 1))).is_empty());
    }

    #[test]
    fn switching_windows_resigns_then_activates() {
        let mut poller = poller(Vec::new());
        poller.observe(Some(window("term", 1)));

        let events = poller.observe(Some(window("editor", 2)));
        assert_eq!(
            events,
            vec![
                FocusEvent::resigned(window("term", 1)),
                FocusEvent::activated(window("editor", 2)),
            ]
        );
    }

    #[test]
    fn losing_focus_only_resigns() {
        let mut poller = poller(Vec::new());
        poller.observe(Some(window("term", 1)));
        assert_eq!(
            poller.observe(None),
            vec![FocusEvent::resigned(window("term", 1))]
        );
    }

    #[tokio::test]
    async fn spawned_poller_streams_edges() {
        let poller = poller(vec![
            Some(window("term", 1)),
            Some(window("term", 1)),
            Some(window("editor", 2)),
        ]);
        let (mut rx, handle) = poller.spawn();

        assert_eq!(rx.recv().await, Some(FocusEvent::activated(window("term", 1))));
        assert_eq!(rx.recv().await, Some(FocusEvent::resigned(window("term", 1))));
        assert_eq!(
            rx.recv().await,
            Some(FocusEvent::activated(window("editor", 2)))
        );

        handle.abort();
    }
}
