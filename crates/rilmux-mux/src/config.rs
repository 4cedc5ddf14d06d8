use std::time::Duration;

/// Configuration for the multiplexer.
#[derive(Debug, Clone)]
pub struct MuxConfig {
    /// Deadline for each in-flight request. `None` disables expiry and a
    /// caller may wait forever on a backend that never answers.
    pub response_timeout: Option<Duration>,
    /// First serial handed out by each slot's counter.
    pub serial_start: i32,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            response_timeout: Some(Duration::from_secs(30)),
            serial_start: 1000,
        }
    }
}
