use crate::slot::SlotId;

/// Errors that can occur during backend discovery and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The named service is not registered with the provider.
    ///
    /// For the preferred variant this triggers fallback to the legacy
    /// variant; for the legacy variant it is terminal.
    #[error("service {service:?} not found")]
    NotFound { service: String },

    /// The named service exists but could not be connected.
    #[error("discovery of {service:?} failed: {message}")]
    Discovery { service: String, message: String },

    /// No backend variant is usable for the slot. Fatal at first use of
    /// that slot; other slots negotiate independently.
    #[error("no OEM hook backend available for {slot}")]
    Unavailable { slot: SlotId },

    /// The backend rejected or failed to accept an outgoing command.
    #[error("backend send failed: {message}")]
    Send { message: String },
}

pub type Result<T> = std::result::Result<T, BackendError>;
