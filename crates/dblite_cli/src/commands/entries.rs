//! Entry commands.

use super::Target;
use crate::convert::{from_json, to_json};
use crate::report::CliResult;
use dblite_core::Identifier;

/// Prints the value stored under `identifier` as JSON.
pub fn get(target: &Target, field: &str, identifier: Identifier) -> CliResult<()> {
    let store = target.connect()?;
    let value = store.get(field, identifier)?;
    println!("{}", serde_json::to_string_pretty(&to_json(value))?);
    Ok(())
}

/// Stores a JSON value under `identifier` and persists.
pub fn put(target: &Target, field: &str, identifier: Identifier, json: &str) -> CliResult<()> {
    let value = from_json(serde_json::from_str(json)?);
    let mut store = target.connect()?;
    store.add(field, value, &identifier)?;
    store.persist()?;
    println!("Stored {identifier} in {field}");
    Ok(())
}

/// Removes the entry under `identifier` and persists.
pub fn remove(target: &Target, field: &str, identifier: Identifier) -> CliResult<()> {
    let mut store = target.connect()?;
    let removed = store.get_field_mut(field)?.remove(&identifier)?;
    store.persist()?;
    println!(
        "Removed {identifier} from {field}: {}",
        serde_json::to_string(&to_json(&removed))?
    );
    Ok(())
}
