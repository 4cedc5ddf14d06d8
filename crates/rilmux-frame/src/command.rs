//! OEM-hook command codes.
//!
//! Codes below `HOOK_BASE` belong to the stock RIL request space and are
//! never produced by this crate.

/// Base of the vendor OEM-hook command space.
pub const HOOK_BASE: i32 = 0x0008_0000;

/// Carries a serialized envelope message as its payload.
pub const CMD_PROTOBUF_MSG: i32 = HOOK_BASE + 14;

/// Sets a transmit-power backoff entry (key, value pair).
pub const CMD_SET_TRANSMIT_POWER: i32 = HOOK_BASE + 16;

/// Returns a human-readable name for a command code.
pub fn command_name(code: i32) -> &'static str {
    match code {
        CMD_PROTOBUF_MSG => "PROTOBUF_MSG",
        CMD_SET_TRANSMIT_POWER => "SET_TRANSMIT_POWER",
        _ if code >= HOOK_BASE => "VENDOR",
        _ => "UNKNOWN",
    }
}

/// Returns true if the code lies in the vendor OEM-hook space.
pub fn is_hook_command(code: i32) -> bool {
    code >= HOOK_BASE
}
