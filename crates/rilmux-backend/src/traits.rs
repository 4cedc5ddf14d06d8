use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;
use crate::slot::SlotId;

/// Which backend variant a handle wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The vendor hook interface, attempted first.
    Preferred,
    /// The deprecated AOSP hook interface, used only when the preferred
    /// service is not registered.
    Legacy,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Preferred => f.write_str("preferred"),
            BackendKind::Legacy => f.write_str("legacy"),
        }
    }
}

/// A connected OEM-hook transport for one slot.
///
/// `send` is fire-and-forget: completion arrives asynchronously on the
/// [`ResponseSink`] installed when the backend was constructed, tagged with
/// the serial passed here. Implementations must be callable from multiple
/// threads.
pub trait OemHookBackend: Send + Sync {
    /// Which variant this handle wraps.
    fn kind(&self) -> BackendKind;

    /// Dispatch a framed command tagged with `serial`.
    fn send(&self, serial: i32, data: Bytes) -> Result<()>;
}

/// Receives asynchronous hook responses.
///
/// Invoked from the transport's own delivery context, concurrently with
/// in-flight senders. Exactly one sink is installed per backend, at
/// construction time.
pub trait ResponseSink: Send + Sync {
    /// Deliver the response for `serial`. `error` is a radio error code
    /// (see [`crate::radio`]); `data` is the raw response buffer.
    fn on_response(&self, serial: i32, error: i32, data: Bytes);
}

/// The embedder-supplied service discovery boundary.
///
/// `lookup` either connects the named service (installing `sink` as its
/// one response handler) or fails.
/// [`BackendError::NotFound`](crate::error::BackendError::NotFound) is the
/// only failure that [`negotiate`](crate::negotiate::negotiate) treats as
/// "try the next variant".
pub trait BackendProvider: Send + Sync {
    /// Look up and connect the named service of the given variant.
    fn lookup(
        &self,
        kind: BackendKind,
        service: &str,
        slot: SlotId,
        sink: Arc<dyn ResponseSink>,
    ) -> Result<Box<dyn OemHookBackend>>;
}
