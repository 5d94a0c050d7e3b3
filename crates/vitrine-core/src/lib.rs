//! Core domain model for vitrine.
//!
//! This crate defines the typed records for an Omeka-style archive
//! database (Item, Collection, Tag, Element, ElementText and friends),
//! the SQLite schema, and the read-only query layer the export jobs
//! are built on.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
