//! Common utilities for the shrew HTML toolkit.
//!
//! This crate provides shared infrastructure used by the other components:
//! - **Repair Notices** - deduplicated terminal diagnostics for markup the
//!   parser had to repair

pub mod warning;
