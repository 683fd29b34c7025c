// Timing and channel constants for the toast lifecycle

use tokio::time::Duration;

/// Interval between periodic progress-fraction publishes
pub(crate) const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Buffer size for a host-wide key feed
pub(crate) const KEY_CHANNEL_CAPACITY: usize = 16;
