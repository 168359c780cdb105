//! Copy command implementation.

use super::Target;
use crate::report::CliResult;
use dblite_core::Pin;
use std::path::Path;

/// Copies the target database to `new_path` under `new_pin`.
pub fn run(target: &Target, new_path: &Path, new_pin: Option<Pin>) -> CliResult<()> {
    let mut store = target.connect()?;
    let copy = store.copy(new_path, new_pin)?;
    println!(
        "Copied {} to {} ({} field(s), new identities)",
        store.path().display(),
        copy.path().display(),
        copy.fields().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dblite_core::{Store, Value};
    use tempfile::tempdir;

    #[test]
    fn copy_keeps_entries() {
        let dir = tempdir().unwrap();
        let target = Target {
            path: dir.path().join("t.dbl"),
            pin: None,
        };
        let mut store = Store::create(&target.path, None, Vec::new()).unwrap();
        store.add_field("users").add(1, "Alice").unwrap();
        store.persist().unwrap();

        let new_path = dir.path().join("copy.dbl");
        run(&target, &new_path, Some(Pin::new(5))).unwrap();

        let copy = Store::connect(&new_path, Some(Pin::new(5))).unwrap();
        assert_eq!(copy.get("users", 1).unwrap(), &Value::from("Alice"));
    }
}
