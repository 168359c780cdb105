//! CLI command implementations.

pub mod copy;
pub mod create;
pub mod entries;
pub mod fields;
pub mod inspect;

use crate::report::CliResult;
use dblite_core::{Pin, Store};
use std::path::PathBuf;

/// The database a command operates on.
#[derive(Debug, Clone)]
pub struct Target {
    /// Database path.
    pub path: PathBuf,
    /// Pin supplied on the command line.
    pub pin: Option<Pin>,
}

impl Target {
    /// Connects to the target database.
    pub fn connect(&self) -> CliResult<Store> {
        tracing::debug!(path = %self.path.display(), pinned = self.pin.is_some(), "opening database");
        Ok(Store::connect(&self.path, self.pin)?)
    }
}
