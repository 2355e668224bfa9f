//! Core functionality for the health tracker.
//!
//! This module contains:
//! - The validated entry model
//! - The append-only entry store
//! - Moving-average and weekly statistics

pub mod aggregate;
pub mod entry;
pub mod store;

// Re-export commonly used types
pub use aggregate::{
    moving_average, moving_average_series, summarize_week, MovingAveragePoint, WeekSummary,
    DEFAULT_WINDOW, WEEK_DAYS,
};
pub use entry::{parse_date, validate_metric, Entry, RawValue, DATE_FORMAT};
pub use store::{add_entry, EntryStore};
