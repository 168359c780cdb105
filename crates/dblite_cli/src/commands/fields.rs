//! Field management commands.

use super::Target;
use crate::report::CliResult;

/// Lists fields in order with their identity and entry count.
pub fn list(target: &Target) -> CliResult<()> {
    let store = target.connect()?;
    if store.fields().is_empty() {
        println!("No fields in {}", store.path().display());
        return Ok(());
    }
    for field in store.fields() {
        println!(
            "{:<24} identity {:>15}  {} entries",
            field.name(),
            field.identity(),
            field.size()
        );
    }
    Ok(())
}

/// Appends an empty field and persists.
pub fn add(target: &Target, name: &str) -> CliResult<()> {
    let mut store = target.connect()?;
    let identity = store.add_field(name).identity();
    store.persist()?;
    println!("Added field {name} (identity {identity})");
    Ok(())
}

/// Removes the first field named `name` and persists.
pub fn remove(target: &Target, name: &str) -> CliResult<()> {
    let mut store = target.connect()?;
    let field = store.remove_field(name)?;
    store.persist()?;
    println!("Removed field {name} ({} entries)", field.size());
    Ok(())
}
