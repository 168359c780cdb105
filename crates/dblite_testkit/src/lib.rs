//! # DBLite Testkit
//!
//! Test utilities for DBLite.
//!
//! This crate provides:
//! - Test fixtures and store helpers
//! - Property-based test generators using proptest
//! - Cross-crate integration test helpers
//! - Snapshot format test vectors
//!
//! ## Usage
//!
//! ```rust
//! use dblite_testkit::prelude::*;
//!
//! with_temp_store(|store| {
//!     store.add_field("users");
//!     store.add("users", "Alice", 1).unwrap();
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use vectors::*;
