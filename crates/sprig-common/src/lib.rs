//! Common utilities for the sprig workspace.
//!
//! This crate provides shared infrastructure used by all sprig components:
//! - **Warning System** - colored, deduplicated stderr output for input that is
//!   accepted but only partially honoured

pub mod warning;
