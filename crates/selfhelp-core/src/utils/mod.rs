//! Utility functions for display formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{calculate_progress, days_left, format_date, format_time, truncate_text};
