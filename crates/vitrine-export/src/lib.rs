//! Flat-file export jobs for vitrine.
//!
//! Implements the CSV export of all items of one item type. The job is
//! deliberately two-pass: first discover the complete output column set
//! across every selected item, then emit one row per item. Collapsing
//! the passes would truncate the schema whenever an item introduces a
//! previously-unseen metadata field late in the sequence.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod columns;
pub mod config;
pub mod error;
pub mod job;

pub use config::Config;
pub use error::{ExportError, ExportResult};
pub use job::{export_items, export_to_path, ExportOptions, ExportReport};
