// Tue Jan 13 2026 - Alex

pub mod logging;

pub use logging::{init_logger, ScopedTimer};

use std::time::Duration;

pub const WORD_SIZE: usize = std::mem::size_of::<u64>();

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();

    if total_secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if total_secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0).floor();
        let secs = total_secs % 60.0;
        format!("{:.0}m {:.1}s", mins, secs)
    }
}

pub fn hex_string(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Number of machine words needed to hold `size` bytes, always leaving at
/// least one spare word behind the object.
pub fn words_for(size: usize) -> usize {
    size / WORD_SIZE + 1
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
