/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame does not start with the "QOEMHOOK" identifier.
    #[error("invalid frame identifier (expected \"QOEMHOOK\")")]
    InvalidIdentifier,

    /// A command that requires a payload was given none.
    #[error("command {command:#x} requires a payload")]
    MissingPayload { command: i32 },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The frame header declares a negative payload length.
    #[error("negative payload length ({0})")]
    NegativeLength(i32),
}

pub type Result<T> = std::result::Result<T, FrameError>;
