use std::sync::atomic::{AtomicI32, Ordering};

/// Monotonically increasing, wrapping serial generator.
///
/// Serials stay in `[0, i32::MAX)`: the step after `i32::MAX - 1` wraps to
/// 0, the floor of the space. Wrapping alone does not guarantee a serial
/// is free — the pending table is consulted at allocation time (see
/// [`channel`](crate::channel)).
#[derive(Debug)]
pub struct SerialCounter {
    next: AtomicI32,
}

impl SerialCounter {
    /// Create a counter whose first serial is `start`.
    pub fn new(start: i32) -> Self {
        Self {
            next: AtomicI32::new(start.rem_euclid(i32::MAX)),
        }
    }

    /// Take the next serial. Safe under arbitrary concurrency: no two
    /// callers ever observe the same value until the counter wraps.
    pub fn advance(&self) -> i32 {
        let step =
            self.next
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                    Some((current + 1) % i32::MAX)
                });
        match step {
            Ok(previous) | Err(previous) => previous,
        }
    }
}
