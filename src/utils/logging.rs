// Tue Jan 13 2026 - Alex

use log::LevelFilter;
use std::time::Instant;

use crate::utils::format_duration;

pub fn level_from_debug(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the `env_logger` backend. `RUST_LOG` still overrides the level
/// picked from the debug flag.
pub fn init_logger(debug: bool) {
    env_logger::Builder::new()
        .filter_level(level_from_debug(debug))
        .format_timestamp(None)
        .parse_default_env()
        .try_init()
        .ok();
}

pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_display(&self) -> String {
        format_duration(self.start.elapsed())
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("[TIMER] {} took {}", self.name, self.elapsed_display());
    }
}
