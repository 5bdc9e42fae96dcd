//! Common utilities for the Gouache painting core.
//!
//! This crate provides shared infrastructure used by all painting components:
//! - **Warning System** - deduplicated diagnostics for unsupported input
//! - **Image Data** - decoded pixel grids handed to the compositor

pub mod image;
pub mod warning;
