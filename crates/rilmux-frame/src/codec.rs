use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::command::{CMD_PROTOBUF_MSG, CMD_SET_TRANSMIT_POWER};
use crate::error::{FrameError, Result};

/// Fixed ASCII identifier opening every OEM-hook frame.
pub const OEM_IDENTIFIER: &[u8; 8] = b"QOEMHOOK";

/// Frame header: identifier (8) + command (4) + length (4) = 16 bytes.
pub const HEADER_SIZE: usize = OEM_IDENTIFIER.len() + 8;

/// Default maximum payload size: 1 MiB. OEM-hook payloads are tiny in
/// practice; anything near this bound indicates a corrupt length field.
pub const DEFAULT_MAX_PAYLOAD: usize = 1024 * 1024;

/// An OEM-hook command frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFrame {
    /// The command code (see [`crate::command`]).
    pub command: i32,
    /// The command-specific payload.
    pub payload: Bytes,
}

impl HookFrame {
    /// Create a frame for an arbitrary command code.
    pub fn new(command: i32, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }

    /// Build a transmit-power frame.
    ///
    /// The payload is exactly `key` followed by `value`, both native-order
    /// 32-bit signed integers.
    pub fn transmit_power(key: i32, value: i32) -> Self {
        let mut payload = BytesMut::with_capacity(8);
        payload.put_i32_ne(key);
        payload.put_i32_ne(value);
        Self::new(CMD_SET_TRANSMIT_POWER, payload.freeze())
    }

    /// Build a protobuf-message frame carrying a serialized envelope.
    ///
    /// Fails with [`FrameError::MissingPayload`] on an empty payload; the
    /// backend treats a bare PROTOBUF_MSG frame as malformed, so the error
    /// is raised here before anything is dispatched.
    pub fn protobuf_message(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.is_empty() {
            return Err(FrameError::MissingPayload {
                command: CMD_PROTOBUF_MSG,
            });
        }
        Ok(Self::new(CMD_PROTOBUF_MSG, payload))
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode this frame into a standalone buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_frame(self, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────────┬───────────┬───────────┬─────────────────┐
/// │ "QOEMHOOK"    │ Command   │ Length    │ Payload         │
/// │ (8B ASCII)    │ (4B NE)   │ (4B NE)   │ (Length bytes)  │
/// └───────────────┴───────────┴───────────┴─────────────────┘
/// ```
pub fn encode_frame(frame: &HookFrame, dst: &mut BytesMut) -> Result<()> {
    if frame.payload.len() > i32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: frame.payload.len(),
            max: i32::MAX as usize,
        });
    }
    dst.reserve(HEADER_SIZE + frame.payload.len());
    dst.put_slice(OEM_IDENTIFIER);
    dst.put_i32_ne(frame.command);
    dst.put_i32_ne(frame.payload.len() as i32);
    dst.put_slice(&frame.payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. The declared
/// payload length must be fully present; a frame is never yielded with
/// fewer payload bytes than its header claims.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<HookFrame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    if src[..OEM_IDENTIFIER.len()] != OEM_IDENTIFIER[..] {
        return Err(FrameError::InvalidIdentifier);
    }

    let command = i32::from_ne_bytes(
        src[OEM_IDENTIFIER.len()..OEM_IDENTIFIER.len() + 4]
            .try_into()
            .expect("slice is 4 bytes"),
    );
    let declared = i32::from_ne_bytes(
        src[OEM_IDENTIFIER.len() + 4..HEADER_SIZE]
            .try_into()
            .expect("slice is 4 bytes"),
    );

    if declared < 0 {
        return Err(FrameError::NegativeLength(declared));
    }
    let payload_len = declared as usize;

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(HookFrame { command, payload }))
}
