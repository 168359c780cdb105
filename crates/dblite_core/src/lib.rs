//! # DBLite Core
//!
//! Single-file snapshot database.
//!
//! This crate provides:
//! - [`Store`]: an ordered list of named fields guarded by an optional pin
//! - [`Field`]: an identifier-keyed, insertion-ordered map of values
//! - The snapshot file format used by [`Store::persist`]
//!
//! Everything happens in memory. A store is only durable after `persist`,
//! which rewrites the whole snapshot file.
//!
//! ```rust,no_run
//! use dblite_core::{Store, Value};
//!
//! let mut store = Store::create("app.dbl", None, Vec::new())?;
//! store.add_field("settings");
//! store.add("settings", Value::from("dark"), "theme")?;
//! store.persist()?;
//! # Ok::<(), dblite_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod field;
mod identifier;
mod identity;
mod pin;
pub mod snapshot;
mod store;

pub use config::Config;
pub use dblite_codec::Value;
pub use error::{CoreError, CoreResult};
pub use field::Field;
pub use identifier::Identifier;
pub use identity::{random_identity, MAX_IDENTITY};
pub use pin::Pin;
pub use snapshot::Snapshot;
pub use store::{Store, DEFAULT_COPY_PATH, DEFAULT_PATH};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
