use std::sync::Arc;

use crate::error::{BackendError, Result};
use crate::slot::SlotId;
use crate::traits::{BackendKind, BackendProvider, OemHookBackend, ResponseSink};

/// Service name of the preferred vendor hook for a slot.
pub fn preferred_service_name(slot: SlotId) -> String {
    format!("oemhook{}", slot.0)
}

/// Service name of the legacy hook for a slot (1-indexed by convention).
pub fn legacy_service_name(slot: SlotId) -> String {
    format!("slot{}", slot.0 + 1)
}

/// Select a backend for `slot`.
///
/// Tries the preferred vendor service first and falls back to the legacy
/// service only when the preferred one is not registered at all. Any other
/// discovery failure propagates as-is. If neither variant is discoverable
/// the slot has no usable backend and [`BackendError::Unavailable`] is
/// returned; callers treat this as fatal for the slot and must not retry.
///
/// Negotiation is not re-run for the lifetime of a slot's handle; the
/// multiplexer memoizes the result.
pub fn negotiate(
    provider: &dyn BackendProvider,
    slot: SlotId,
    sink: Arc<dyn ResponseSink>,
) -> Result<Box<dyn OemHookBackend>> {
    let preferred = preferred_service_name(slot);
    match provider.lookup(BackendKind::Preferred, &preferred, slot, Arc::clone(&sink)) {
        Ok(backend) => {
            tracing::info!(%slot, service = %preferred, "using preferred OEM hook");
            Ok(backend)
        }
        Err(BackendError::NotFound { service }) => {
            tracing::warn!(
                %slot,
                service = %service,
                "preferred OEM hook not found, falling back to legacy hook"
            );
            let legacy = legacy_service_name(slot);
            match provider.lookup(BackendKind::Legacy, &legacy, slot, sink) {
                Ok(backend) => {
                    tracing::info!(%slot, service = %legacy, "using legacy OEM hook");
                    Ok(backend)
                }
                Err(err) => {
                    tracing::error!(%slot, service = %legacy, %err, "legacy OEM hook lookup failed");
                    Err(BackendError::Unavailable { slot })
                }
            }
        }
        Err(err) => Err(err),
    }
}
