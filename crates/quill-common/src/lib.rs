//! Common utilities for the Quill text bridge.
//!
//! This crate provides shared infrastructure used by all bridge components:
//! - **Warning System** - deduplicated warnings routed through `tracing`
//! - **URL Resolution** - resolving link targets against a document base

pub mod url;
pub mod warning;
