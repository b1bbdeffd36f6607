//! Debounced remote validation of the goal text.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::assistant::{GoalValidationService, RemoteValidation};

/// A remote verdict tagged with the input version it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct DebouncedValidation {
    pub version: u64,
    pub text: String,
    pub result: RemoteValidation,
}

struct PendingCall {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

/// Fires one remote validation after the input has been idle for `delay`.
///
/// Every scheduled input gets a new version. A call that has not fired yet is
/// aborted when newer input arrives; a call already in flight runs to the end
/// and its result is discarded unless its version is still current.
///
/// Must be used from within a tokio runtime.
pub struct ValidationDebouncer {
    service: GoalValidationService,
    delay: Duration,
    version: Arc<AtomicU64>,
    pending: Option<PendingCall>,
    tx: mpsc::UnboundedSender<DebouncedValidation>,
}

impl ValidationDebouncer {
    pub fn new(
        service: GoalValidationService,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<DebouncedValidation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            service,
            delay,
            version: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, version: u64) -> bool {
        self.current_version() == version
    }

    /// Schedules validation of `text`, superseding any earlier input.
    pub fn schedule(&mut self, text: String) -> u64 {
        let version = self.bump();

        let fired = Arc::new(AtomicBool::new(false));
        let task_fired = fired.clone();
        let current = self.version.clone();
        let service = self.service.clone();
        let tx = self.tx.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != version {
                return;
            }
            task_fired.store(true, Ordering::SeqCst);
            debug!("Validating goal input v{}", version);

            let result = service.validate(&text).await;
            if current.load(Ordering::SeqCst) != version {
                debug!("Dropping stale validation v{}", version);
                return;
            }
            let _ = tx.send(DebouncedValidation {
                version,
                text,
                result,
            });
        });

        self.pending = Some(PendingCall { handle, fired });
        version
    }

    /// Invalidates any scheduled or in-flight call.
    pub fn cancel(&mut self) -> u64 {
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(pending) = self.pending.take() {
            if !pending.fired.load(Ordering::SeqCst) {
                pending.handle.abort();
            }
        }
        version
    }
}

impl Drop for ValidationDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}
