//! Envelope message schema for OEM-hook protobuf commands.
//!
//! The modem's hook channel moves opaque byte buffers; structured commands
//! ride inside an [`Envelope`] — token, direction, command id, error code,
//! payload — whose serialized bytes become the payload of a PROTOBUF_MSG
//! wire frame. Messages are serialized with [`postcard`]; the schema is
//! the agreement with the peer, the encoding is never hand-rolled.
//!
//! This crate owns no state: it is a pure encode/decode/validate layer.

pub mod envelope;
pub mod error;
pub mod gba;

pub use envelope::{Envelope, HookCommand, MessageKind, MessageStatus, UNUSED_TOKEN};
pub use error::{ProtoError, Result};
pub use gba::{
    decode_payload, encode_payload, GbaInitRequest, GbaInitResponse, ImpiRequest, ImpiResponse,
    UiccApplication,
};
