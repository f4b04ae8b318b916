use rollcall_core::error::RollcallError;
use rollcall_core::mapping::{JsonFileStore, MappingStore};
use std::path::Path;

use crate::output;

pub fn list(path: &Path) -> Result<(), RollcallError> {
    let store = JsonFileStore::new(path);
    let mapping = store.load()?;
    output::table::print_mapping(&mapping);
    Ok(())
}

pub fn set(path: &Path, alias: &str, canonical: &str) -> Result<(), RollcallError> {
    let (alias, canonical) = (alias.trim(), canonical.trim());
    let store = JsonFileStore::new(path);
    let mut mapping = store.load()?;
    match mapping.insert(alias, canonical) {
        Some(previous) => eprintln!("Updated '{alias}': '{previous}' -> '{canonical}'"),
        None => eprintln!("Added '{alias}' -> '{canonical}'"),
    }
    store.save(&mapping)
}

pub fn remove(path: &Path, alias: &str) -> Result<(), RollcallError> {
    let alias = alias.trim();
    let store = JsonFileStore::new(path);
    let mut mapping = store.load()?;
    if mapping.remove(alias).is_none() {
        eprintln!("No entry for '{alias}'");
        return Ok(());
    }
    store.save(&mapping)?;
    eprintln!("Removed '{alias}'");
    Ok(())
}

pub fn path(path: &Path) -> Result<(), RollcallError> {
    println!("{}", path.display());
    Ok(())
}
