//! Create command implementation.

use super::Target;
use crate::report::CliResult;
use dblite_core::{Field, Store};

/// Creates a database, seeding it with empty fields named in `fields`.
pub fn run(target: &Target, fields: &[String]) -> CliResult<()> {
    let fields = fields.iter().map(Field::new).collect();
    let store = Store::create(&target.path, target.pin, fields)?;
    println!(
        "Created {} with {} field(s)",
        store.path().display(),
        store.fields().len()
    );
    Ok(())
}
