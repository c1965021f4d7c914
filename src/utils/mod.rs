//! Utility modules for common functionality
//!
//! Logging, progress display and colour parsing used by the commands.

pub mod logger;
pub mod progress;
pub mod color_utils;
