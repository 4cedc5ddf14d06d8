use std::time::Duration;

use rilmux_backend::BackendError;
use rilmux_frame::FrameError;

/// Errors that can occur while multiplexing hook requests.
#[derive(Debug, thiserror::Error)]
pub enum MuxError {
    /// Backend negotiation or dispatch failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Frame construction failed before dispatch.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// The backend delivered a non-success radio error for this request.
    #[error("transport delivered radio error {code}")]
    Transport { code: i32 },

    /// No response arrived within the configured deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The completion handle was dropped before resolution.
    #[error("response channel closed before resolution")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, MuxError>;
