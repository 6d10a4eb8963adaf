use std::time::Duration;

/// Default display refresh interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Shortest interval accepted from config
pub const MIN_TICK_MS: u64 = 50;

/// Get tick duration, falling back to the default when unset
pub fn tick_duration(tick_ms: Option<u64>) -> Duration {
    let ms = tick_ms.unwrap_or(DEFAULT_TICK_MS).max(MIN_TICK_MS);
    Duration::from_millis(ms)
}
