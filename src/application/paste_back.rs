//! Paste-back: re-inject a restored entry into the previously focused app

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::focus::FocusRecord;
use crate::domain::timing::Interval;

use super::ports::{DesktopControl, PasteKeystroke};

/// Errors from paste-back. Both are non-fatal: the clipboard already holds
/// the text, so the user can still paste manually.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasteBackError {
    #[error("Paste target {0} is no longer running")]
    TargetGone(String),

    #[error("Could not paste into {target} after {attempts} attempts: {last_error}")]
    InjectionFailed {
        target: String,
        attempts: u32,
        last_error: String,
    },
}

/// Successful paste-back outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// No target known, nothing to do
    Skipped,
    /// Paste keystroke delivered on the given attempt (1-based)
    Pasted { attempts: u32 },
}

/// How often and how patiently to retry the paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Pause between attempts, giving activation time to take effect
    pub delay: Interval,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Interval::default_paste_retry_delay(),
        }
    }
}

/// Activates the paste target and sends it the paste shortcut
pub struct PasteBackAgent<D = Box<dyn DesktopControl>, K = Box<dyn PasteKeystroke>>
where
    D: DesktopControl,
    K: PasteKeystroke,
{
    desktop: D,
    keystroke: K,
    policy: RetryPolicy,
}

impl<D, K> PasteBackAgent<D, K>
where
    D: DesktopControl,
    K: PasteKeystroke,
{
    /// Create a new agent
    pub fn new(desktop: D, keystroke: K, policy: RetryPolicy) -> Self {
        Self {
            desktop,
            keystroke,
            policy,
        }
    }

    /// Paste the current clipboard content into `target`.
    ///
    /// `text` is what the caller put on the clipboard; it is only used for
    /// diagnostics since the keystroke pastes whatever the clipboard holds.
    /// This sleeps between attempts and must not run on the timer task.
    pub async fn inject(
        &self,
        target: Option<FocusRecord>,
        text: &str,
    ) -> Result<PasteOutcome, PasteBackError> {
        let Some(target) = target else {
            debug!("no paste target recorded, skipping paste-back");
            return Ok(PasteOutcome::Skipped);
        };

        if !self.desktop.is_running(&target).await {
            warn!(target_app = %target, "paste target is gone");
            return Err(PasteBackError::TargetGone(target.to_string()));
        }

        let attempts = self.policy.attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.delay.as_std()).await;
            }

            match self.try_paste(&target).await {
                Ok(()) => {
                    info!(
                        target_app = %target,
                        attempt,
                        chars = text.chars().count(),
                        "pasted restored entry"
                    );
                    return Ok(PasteOutcome::Pasted { attempts: attempt });
                }
                Err(e) => {
                    debug!(target_app = %target, attempt, error = %e, "paste attempt failed");
                    last_error = e;
                }
            }
        }

        warn!(target_app = %target, attempts, error = %last_error, "paste-back gave up");
        Err(PasteBackError::InjectionFailed {
            target: target.to_string(),
            attempts,
            last_error,
        })
    }

    async fn try_paste(&self, target: &FocusRecord) -> Result<(), String> {
        self.desktop
            .activate(target)
            .await
            .map_err(|e| e.to_string())?;
        self.keystroke
            .send_paste(target)
            .await
            .map_err(|e| e.to_string())
    }
}
