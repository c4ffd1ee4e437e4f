pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod planner;
pub mod session;
pub mod storage;

use std::sync::atomic::{AtomicBool, Ordering};

pub use error::{PlannerError, Result};

/// Whether debug logging is active, shared between the logger filter and the settings toggle.
static DEBUG_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOGGING.store(enabled, Ordering::Relaxed);
}

pub fn debug_logging() -> bool {
    DEBUG_LOGGING.load(Ordering::Relaxed)
}
