//! Process-wide owner of the single sandbox instance.
//!
//! Slot transitions: `Empty -> Booting -> Ready`, `Booting -> Empty` on boot
//! failure, `Ready -> Empty` on teardown. Concurrent `acquire` calls during a
//! boot all wait on the same watch channel, so exactly one boot runs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::kernel::services::ports::{
    Sandbox, SandboxError, SandboxRuntime, SandboxSettings, SandboxStatus,
};

type BootOutcome = Result<Sandbox, SandboxError>;

enum Slot {
    Empty,
    Booting {
        epoch: u64,
        rx: watch::Receiver<Option<BootOutcome>>,
    },
    Ready(Sandbox),
}

struct ScheduledTeardown {
    token: u64,
    task: AbortHandle,
}

struct Inner {
    slot: Slot,
    epoch: u64,
    next_token: u64,
    teardown: Option<ScheduledTeardown>,
}

impl Inner {
    fn cancel_teardown(&mut self) -> bool {
        match self.teardown.take() {
            Some(scheduled) => {
                scheduled.task.abort();
                true
            }
            None => false,
        }
    }
}

struct Shared {
    runtime: Arc<dyn SandboxRuntime>,
    handle: Handle,
    grace: Duration,
    inner: Mutex<Inner>,
    status: watch::Sender<SandboxStatus>,
}

/// Cheap to clone; all clones manage the same slot.
#[derive(Clone)]
pub struct SandboxLifecycle {
    shared: Arc<Shared>,
}

impl SandboxLifecycle {
    pub fn new(runtime: Arc<dyn SandboxRuntime>, settings: &SandboxSettings, handle: Handle) -> Self {
        Self::with_grace(runtime, settings.teardown_grace(), handle)
    }

    pub fn with_grace(runtime: Arc<dyn SandboxRuntime>, grace: Duration, handle: Handle) -> Self {
        let (status, _) = watch::channel(SandboxStatus::Empty);
        Self {
            shared: Arc::new(Shared {
                runtime,
                handle,
                grace,
                inner: Mutex::new(Inner {
                    slot: Slot::Empty,
                    epoch: 0,
                    next_token: 0,
                    teardown: None,
                }),
                status,
            }),
        }
    }

    pub fn grace(&self) -> Duration {
        self.shared.grace
    }

    pub fn status(&self) -> SandboxStatus {
        self.shared.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SandboxStatus> {
        self.shared.status.subscribe()
    }

    pub fn is_teardown_scheduled(&self) -> bool {
        self.shared.lock().teardown.is_some()
    }

    /// Returns the shared sandbox, booting it if the slot is empty. Cancels a
    /// pending release.
    pub async fn acquire(&self) -> Result<Sandbox, SandboxError> {
        let (epoch, mut rx) = {
            let mut guard = self.shared.lock();
            let inner = &mut *guard;
            if inner.cancel_teardown() {
                tracing::debug!("pending sandbox teardown cancelled");
            }
            let waiting = match &inner.slot {
                Slot::Ready(sandbox) => return Ok(Arc::clone(sandbox)),
                Slot::Booting { epoch, rx } => Some((*epoch, rx.clone())),
                Slot::Empty => None,
            };
            match waiting {
                Some(waiting) => waiting,
                None => self.start_boot(inner),
            }
        };

        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone(),
            Err(_) => None,
        };
        match outcome {
            Some(outcome) => outcome,
            None => {
                self.shared.abandon_boot(epoch);
                Err(SandboxError::BootInterrupted)
            }
        }
    }

    /// Schedules teardown after the grace window. A later `acquire` within the
    /// window cancels it.
    pub fn release(&self) {
        let mut inner = self.shared.lock();
        if matches!(inner.slot, Slot::Empty) || inner.teardown.is_some() {
            return;
        }

        inner.next_token += 1;
        let token = inner.next_token;
        let shared = Arc::clone(&self.shared);
        let grace = self.shared.grace;
        let task = self.shared.handle.spawn(async move {
            tokio::time::sleep(grace).await;
            shared.fire_teardown(token).await;
        });
        inner.teardown = Some(ScheduledTeardown {
            token,
            task: task.abort_handle(),
        });
        tracing::debug!(grace_ms = grace.as_millis() as u64, "sandbox teardown scheduled");
    }

    /// Tears the sandbox down now, ignoring any pending release.
    pub async fn force_destroy(&self) {
        let taken = {
            let mut inner = self.shared.lock();
            inner.cancel_teardown();
            self.shared.reset(&mut inner)
        };
        if let Some(sandbox) = taken {
            teardown_quietly(sandbox).await;
        }
    }

    fn start_boot(&self, inner: &mut Inner) -> (u64, watch::Receiver<Option<BootOutcome>>) {
        inner.epoch += 1;
        let epoch = inner.epoch;
        let (tx, rx) = watch::channel(None);
        inner.slot = Slot::Booting {
            epoch,
            rx: rx.clone(),
        };
        self.shared.status.send_replace(SandboxStatus::Booting);
        tracing::info!(epoch, "booting sandbox");

        let shared = Arc::clone(&self.shared);
        let boot = self.shared.handle.spawn(self.shared.runtime.boot());
        self.shared.handle.spawn(async move {
            let outcome = match boot.await {
                Ok(outcome) => outcome,
                Err(e) => Err(SandboxError::boot(format!("boot task failed: {e}"))),
            };
            let outcome = shared.finish_boot(epoch, outcome).await;
            tx.send_replace(Some(outcome));
        });
        (epoch, rx)
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Empties the slot and returns the sandbox that needs tearing down.
    fn reset(&self, inner: &mut Inner) -> Option<Sandbox> {
        inner.epoch += 1;
        let previous = std::mem::replace(&mut inner.slot, Slot::Empty);
        self.status.send_replace(SandboxStatus::Empty);
        match previous {
            Slot::Ready(sandbox) => Some(sandbox),
            Slot::Booting { .. } | Slot::Empty => None,
        }
    }

    /// Frees a slot whose boot task vanished without reporting.
    fn abandon_boot(&self, epoch: u64) {
        let mut inner = self.lock();
        let current = matches!(&inner.slot, Slot::Booting { epoch: e, .. } if *e == epoch);
        if current {
            tracing::warn!(epoch, "sandbox boot task ended without a result");
            self.reset(&mut inner);
        }
    }

    async fn finish_boot(&self, epoch: u64, outcome: BootOutcome) -> BootOutcome {
        let orphan = {
            let mut inner = self.lock();
            let current = matches!(&inner.slot, Slot::Booting { epoch: e, .. } if *e == epoch);
            if current {
                match &outcome {
                    Ok(sandbox) => {
                        inner.slot = Slot::Ready(Arc::clone(sandbox));
                        self.status.send_replace(SandboxStatus::Ready);
                        tracing::info!(epoch, "sandbox ready");
                    }
                    Err(e) => {
                        inner.slot = Slot::Empty;
                        self.status.send_replace(SandboxStatus::Failed {
                            message: e.to_string(),
                        });
                        tracing::error!(epoch, error = %e, "sandbox boot failed");
                    }
                }
                None
            } else {
                outcome.as_ref().ok().cloned()
            }
        };

        match orphan {
            Some(sandbox) => {
                tracing::info!(epoch, "sandbox finished booting after being destroyed");
                teardown_quietly(sandbox).await;
                Err(SandboxError::Destroyed)
            }
            None => outcome,
        }
    }

    async fn fire_teardown(&self, token: u64) {
        let taken = {
            let mut inner = self.lock();
            match &inner.teardown {
                Some(scheduled) if scheduled.token == token => {}
                _ => return,
            }
            inner.teardown = None;
            self.reset(&mut inner)
        };
        if let Some(sandbox) = taken {
            tracing::info!("grace window elapsed, tearing down sandbox");
            teardown_quietly(sandbox).await;
        }
    }
}

async fn teardown_quietly(sandbox: Sandbox) {
    if let Err(e) = sandbox.teardown().await {
        tracing::warn!(error = %e, "sandbox teardown failed");
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/sandbox/lifecycle.rs"]
mod tests;
