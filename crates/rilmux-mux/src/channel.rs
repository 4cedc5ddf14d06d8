//! Per-slot correlation state.
//!
//! A [`SlotHandle`] wraps exactly one negotiated backend together with the
//! slot's serial counter and pending-request table. The table key is the
//! single source of truth for resolution: only an exact serial match ever
//! resolves a waiting caller, so a stale or duplicate callback can never
//! corrupt another request's result.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::{Arc, Weak};
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use rilmux_backend::{
    negotiate, radio_error_name, BackendProvider, OemHookBackend, ResponseSink, SlotId,
    RADIO_ERROR_SUCCESS,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::config::MuxConfig;
use crate::error::{MuxError, Result};
use crate::serial::SerialCounter;

type Completion = oneshot::Sender<Result<Bytes>>;

/// An expiry registration handed to the slot's sweeper task.
///
/// Ordered by deadline (field order matters for the derived `Ord`).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Expiry {
    deadline: Instant,
    serial: i32,
    timeout: Duration,
}

/// Correlation state shared between callers, the backend's response
/// callback, and the sweeper.
pub(crate) struct SlotState {
    slot: SlotId,
    serials: SerialCounter,
    pending: Mutex<HashMap<i32, Completion>>,
    expiry_tx: mpsc::UnboundedSender<Expiry>,
}

impl SlotState {
    /// Allocate a fresh serial and park a completion handle under it.
    ///
    /// Allocation and insertion happen in one critical section: a serial
    /// still present in the table (possible after counter wraparound with
    /// extreme in-flight counts) is skipped, so an in-flight serial is
    /// never reissued.
    fn register(&self) -> (i32, oneshot::Receiver<Result<Bytes>>) {
        let mut pending = self.pending.lock();
        let serial = loop {
            let candidate = self.serials.advance();
            if !pending.contains_key(&candidate) {
                break candidate;
            }
            tracing::warn!(slot = %self.slot, serial = candidate, "serial still in flight, skipping");
        };
        let (tx, rx) = oneshot::channel();
        pending.insert(serial, tx);
        (serial, rx)
    }

    /// Drop a pending entry without resolving it (dispatch failed before
    /// the request ever left).
    fn forget(&self, serial: i32) {
        self.pending.lock().remove(&serial);
    }

    /// Ask the sweeper to expire `serial` after `timeout`.
    fn schedule_expiry(&self, serial: i32, timeout: Duration) {
        let registration = Expiry {
            deadline: Instant::now() + timeout,
            serial,
            timeout,
        };
        // The sweeper outlives every sender; a closed channel only means
        // the whole slot state is being torn down.
        let _ = self.expiry_tx.send(registration);
    }

    /// Resolve `serial` with a timeout failure, if it is still pending.
    fn expire(&self, serial: i32, timeout: Duration) {
        let Some(tx) = self.pending.lock().remove(&serial) else {
            return; // Resolved in time; nothing to do.
        };
        tracing::warn!(slot = %self.slot, serial, ?timeout, "request expired without a response");
        let _ = tx.send(Err(MuxError::Timeout(timeout)));
    }
}

impl ResponseSink for SlotState {
    fn on_response(&self, serial: i32, error: i32, data: Bytes) {
        let Some(tx) = self.pending.lock().remove(&serial) else {
            // Stale, duplicate, or unknown correlation. Nobody is waiting,
            // so this is logged and swallowed, never surfaced.
            tracing::warn!(slot = %self.slot, serial, error, "no pending request for response");
            return;
        };

        let result = if error == RADIO_ERROR_SUCCESS {
            Ok(data)
        } else {
            tracing::debug!(
                slot = %self.slot,
                serial,
                error,
                name = radio_error_name(error),
                "request failed in transport"
            );
            Err(MuxError::Transport { code: error })
        };

        if tx.send(result).is_err() {
            tracing::debug!(slot = %self.slot, serial, "caller gone before resolution");
        }
    }
}

/// One negotiated backend plus its correlation state. Created lazily on
/// first use of a slot and kept for the life of the process.
pub(crate) struct SlotHandle {
    state: Arc<SlotState>,
    backend: Box<dyn OemHookBackend>,
}

impl SlotHandle {
    /// Negotiate a backend for `slot` and spawn its deadline sweeper.
    ///
    /// Must run inside a tokio runtime.
    pub(crate) fn connect(
        provider: &dyn BackendProvider,
        slot: SlotId,
        config: &MuxConfig,
    ) -> Result<Self> {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        let state = Arc::new(SlotState {
            slot,
            serials: SerialCounter::new(config.serial_start),
            pending: Mutex::new(HashMap::new()),
            expiry_tx,
        });

        let backend = negotiate(provider, slot, Arc::clone(&state) as Arc<dyn ResponseSink>)?;
        tracing::debug!(%slot, kind = %backend.kind(), "slot channel established");

        tokio::spawn(sweep(Arc::downgrade(&state), expiry_rx));

        Ok(Self { state, backend })
    }

    /// Dispatch `data` and await its response.
    pub(crate) async fn dispatch(&self, data: Bytes, timeout: Option<Duration>) -> Result<Bytes> {
        let (serial, rx) = self.state.register();
        if let Some(timeout) = timeout {
            self.state.schedule_expiry(serial, timeout);
        }

        tracing::debug!(slot = %self.state.slot, serial, len = data.len(), "dispatching hook command");
        if let Err(err) = self.backend.send(serial, data) {
            self.state.forget(serial);
            return Err(err.into());
        }

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(MuxError::ChannelClosed),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> Arc<SlotState> {
        Arc::clone(&self.state)
    }
}

/// Deadline sweeper: one task per slot, owning a time-ordered heap of
/// expiry registrations. Holds only a weak reference to the slot state and
/// exits when the state (and with it the registration channel) goes away.
async fn sweep(state: Weak<SlotState>, mut rx: mpsc::UnboundedReceiver<Expiry>) {
    let mut deadlines: BinaryHeap<Reverse<Expiry>> = BinaryHeap::new();

    loop {
        let next_deadline = deadlines.peek().map(|entry| entry.0.deadline);
        let wait = async {
            match next_deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            registration = rx.recv() => {
                match registration {
                    Some(entry) => deadlines.push(Reverse(entry)),
                    None => return, // Slot state dropped.
                }
            }
            () = wait => {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let now = Instant::now();
                while let Some(Reverse(entry)) = deadlines.peek() {
                    if entry.deadline > now {
                        break;
                    }
                    let Some(Reverse(entry)) = deadlines.pop() else {
                        break;
                    };
                    state.expire(entry.serial, entry.timeout);
                }
            }
        }
    }
}
