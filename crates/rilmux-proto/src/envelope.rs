use serde::{Deserialize, Serialize};

use crate::error::{ProtoError, Result};

/// Placeholder for the envelope token field.
///
/// The peer schema reserves the token but no deployment observed so far
/// assigns it meaning. Treat it as opaque; do not invent per-call
/// uniqueness here.
pub const UNUSED_TOKEN: i64 = -1;

/// Direction of an envelope message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Request,
    Response,
}

/// Commands understood by the modem's envelope endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookCommand {
    /// GBA bootstrapping / NAF key derivation.
    GbaInit,
    /// Fetch the (optionally encrypted) IMPI blob.
    GetImpi,
}

/// Status codes carried on response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    Success,
    GenericFailure,
    NotSupported,
    InvalidArgument,
}

/// The structured message exchanged over PROTOBUF_MSG frames.
///
/// `error` is populated on responses only; requests leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub token: i64,
    pub kind: MessageKind,
    pub command: HookCommand,
    pub error: Option<MessageStatus>,
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Build a request envelope for `command` around an encoded payload.
    pub fn request(command: HookCommand, payload: Vec<u8>) -> Self {
        Self {
            token: UNUSED_TOKEN,
            kind: MessageKind::Request,
            command,
            error: None,
            payload,
        }
    }

    /// Build a success response envelope (peer side, used in tests).
    pub fn response(command: HookCommand, status: MessageStatus, payload: Vec<u8>) -> Self {
        Self {
            token: UNUSED_TOKEN,
            kind: MessageKind::Response,
            command,
            error: Some(status),
            payload,
        }
    }

    /// Serialize this envelope for transmission.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize an envelope from received bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Validate this envelope as the response to a request for `command`
    /// and extract its payload.
    ///
    /// Checks, in order: the message is a response, it answers the same
    /// command, and its status is [`MessageStatus::Success`]. A response
    /// with no status at all fails validation — the payload of an
    /// unknown-status response must never be trusted.
    pub fn into_response_payload(self, command: HookCommand) -> Result<Vec<u8>> {
        if self.kind != MessageKind::Response {
            return Err(ProtoError::NotAResponse { got: self.kind });
        }
        if self.command != command {
            return Err(ProtoError::CommandMismatch {
                expected: command,
                got: self.command,
            });
        }
        match self.error {
            Some(MessageStatus::Success) => Ok(self.payload),
            Some(status) => Err(ProtoError::Remote { command, status }),
            None => Err(ProtoError::MissingStatus { command }),
        }
    }
}
