//! Tabular export of recorded entries.
//!
//! Exported files are plain CSV so external tools (spreadsheets, plotting
//! scripts) can consume them; the same files can be read back with
//! [`import_csv`].

pub mod table;

pub use table::{export_csv, import_csv, CSV_HEADER};
