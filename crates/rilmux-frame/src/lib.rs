//! OEM-hook wire frame encoding for RIL command dispatch.
//!
//! Every command handed to an OEM-hook backend is framed with:
//! - The 8-byte ASCII identifier "QOEMHOOK" for request recognition
//! - A 4-byte native-order signed command code
//! - A 4-byte native-order signed payload length
//!
//! Native byte order is deliberate: the frame never crosses a machine
//! boundary, it is consumed by the radio daemon on the same SoC.

pub mod codec;
pub mod command;
pub mod error;

pub use codec::{decode_frame, encode_frame, HookFrame, DEFAULT_MAX_PAYLOAD, HEADER_SIZE, OEM_IDENTIFIER};
pub use command::{command_name, CMD_PROTOBUF_MSG, CMD_SET_TRANSMIT_POWER, HOOK_BASE};
pub use error::{FrameError, Result};
