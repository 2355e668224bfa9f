//! Health Tracker - record daily health metrics and watch short-term trends.
//!
//! This library keeps time-stamped observations such as body weight, sleep
//! hours, or step counts in memory, computes trend statistics over them, and
//! exports them as CSV for other tools.
//!
//! # Guarantees
//!
//! - **Validated input**: every entry has a `YYYY-MM-DD` date, a non-blank
//!   metric name, and a finite non-negative value
//! - **Append-only**: entries are never updated or removed
//! - **Explicit state**: every operation takes the store it works on
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Health Tracker                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │  add_entry  │──▶│ EntryStore  │──▶│  Aggregate  │        │
//! │  │ (validate)  │   │  (ordered)  │   │ (avg, week) │        │
//! │  └─────────────┘   └─────────────┘   └─────────────┘        │
//! │                           │                                 │
//! │                           ▼                                 │
//! │                    ┌─────────────┐                          │
//! │                    │  CSV export │──▶ date,metric,value     │
//! │                    └─────────────┘                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use health_tracker::{add_entry, export_csv, moving_average, EntryStore};
//!
//! let mut entries = EntryStore::new();
//! add_entry(&mut entries, "2025-09-01", "weight", 70.0)?;
//! add_entry(&mut entries, "2025-09-02", "weight", 71.0)?;
//! add_entry(&mut entries, "2025-09-03", "weight", 72.0)?;
//!
//! assert_eq!(moving_average(&entries, "weight", 3)?, 71.0);
//! export_csv(&entries, "health_entries.csv")?;
//! # Ok::<(), health_tracker::TrackerError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod export;

// Re-export key types at crate root for convenience
pub use crate::config::{Config, ConfigError};
pub use crate::core::{
    add_entry, moving_average, moving_average_series, summarize_week, Entry, EntryStore,
    MovingAveragePoint, RawValue, WeekSummary, DATE_FORMAT, DEFAULT_WINDOW,
};
pub use crate::error::{Result, TrackerError};
pub use crate::export::{export_csv, import_csv, CSV_HEADER};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
