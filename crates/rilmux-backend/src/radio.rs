//! Radio error codes delivered alongside hook responses.
//!
//! Only the codes rilmux interprets are named; anything else is forwarded
//! to the caller verbatim inside a transport error.

/// The request completed successfully; the response payload is valid.
pub const RADIO_ERROR_SUCCESS: i32 = 0;

/// The radio is not available (powered off or mid-reset).
pub const RADIO_ERROR_NOT_AVAILABLE: i32 = 1;

/// Generic modem failure.
pub const RADIO_ERROR_GENERIC_FAILURE: i32 = 2;

/// The modem rejected the request arguments.
pub const RADIO_ERROR_INVALID_ARGUMENTS: i32 = 44;

/// Returns a human-readable name for a radio error code.
pub fn radio_error_name(code: i32) -> &'static str {
    match code {
        RADIO_ERROR_SUCCESS => "NONE",
        RADIO_ERROR_NOT_AVAILABLE => "RADIO_NOT_AVAILABLE",
        RADIO_ERROR_GENERIC_FAILURE => "GENERIC_FAILURE",
        RADIO_ERROR_INVALID_ARGUMENTS => "INVALID_ARGUMENTS",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_codes() {
        assert_eq!(radio_error_name(RADIO_ERROR_SUCCESS), "NONE");
        assert_eq!(radio_error_name(RADIO_ERROR_GENERIC_FAILURE), "GENERIC_FAILURE");
        assert_eq!(radio_error_name(12345), "UNKNOWN");
    }
}
