//! Disruptor core constants and configuration defaults.

use std::time::Duration;

/// Default ring buffer size (must be a power of two).
pub const DEFAULT_RING_BUFFER_SIZE: usize = 1024;

/// Cache line size used for alignment/padding of `Sequence` and the
/// producer/consumer cursors (64 bytes on most modern CPUs).
pub const CACHE_LINE_SIZE: usize = 64;

/// Number of spin iterations `YieldingWaitStrategy` attempts before
/// yielding the thread, as specified in §4.3.
pub const YIELD_SPIN_THRESHOLD: usize = 100;

/// Default per-cycle timeout for `TimeoutBlockingWaitStrategy`.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(100);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_default_is_power_of_two() {
        assert!(DEFAULT_RING_BUFFER_SIZE.is_power_of_two());
    }

    #[test]
    fn cache_line_size_matches_common_target() {
        assert_eq!(CACHE_LINE_SIZE, 64);
    }
}
