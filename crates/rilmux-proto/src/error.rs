use crate::envelope::{HookCommand, MessageKind, MessageStatus};

/// Errors that can occur while building or validating envelope messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// Serialization or deserialization failed.
    #[error("envelope codec error: {0}")]
    Codec(#[from] postcard::Error),

    /// The peer answered with something other than a response message.
    #[error("expected a response message, got {got:?}")]
    NotAResponse { got: MessageKind },

    /// The response carries a different command id than the request.
    #[error("expected a response for {expected:?}, got {got:?}")]
    CommandMismatch {
        expected: HookCommand,
        got: HookCommand,
    },

    /// A response message arrived without an error field.
    #[error("response for {command:?} is missing its status")]
    MissingStatus { command: HookCommand },

    /// The peer rejected the operation.
    #[error("remote peer rejected {command:?}: {status:?}")]
    Remote {
        command: HookCommand,
        status: MessageStatus,
    },
}

pub type Result<T> = std::result::Result<T, ProtoError>;
