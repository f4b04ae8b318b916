pub mod builtin;

use crate::error::RollcallError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Administrator-maintained table of company aliases (typos, local names)
/// to canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an alias. Returns the canonical value it replaced.
    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Option<String> {
        self.entries.insert(alias.into(), canonical.into())
    }

    pub fn remove(&mut self, alias: &str) -> Option<String> {
        self.entries.remove(alias)
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Key an alias is matched by: spaces removed, lowercased.
    pub fn lookup_key(alias: &str) -> String {
        alias.replace(' ', "").to_lowercase()
    }

    /// Build the lookup index used during normalization.
    ///
    /// Aliases that collapse to the same key resolve to the one that sorts last.
    pub fn index(&self) -> MappingIndex {
        MappingIndex {
            by_key: self
                .entries
                .iter()
                .map(|(alias, canonical)| (Mapping::lookup_key(alias), canonical.clone()))
                .collect(),
        }
    }
}

impl<A: Into<String>, C: Into<String>> FromIterator<(A, C)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        let mut m = Mapping::new();
        for (alias, canonical) in iter {
            m.insert(alias, canonical);
        }
        m
    }
}

/// Normalized-key view of a [`Mapping`], built once per pipeline run.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    by_key: HashMap<String, String>,
}

impl MappingIndex {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }
}

/// Backend that persists the alias table between runs.
pub trait MappingStore: Send + Sync {
    /// Load the current table, seeding it with the built-in defaults if none exists.
    fn load(&self) -> Result<Mapping, RollcallError>;

    /// Replace the persisted table.
    fn save(&self, mapping: &Mapping) -> Result<(), RollcallError>;

    /// Where the table lives (for diagnostics).
    fn location(&self) -> String;
}

/// Mapping persisted as a pretty-printed JSON object.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_err(&self, reason: impl ToString) -> RollcallError {
        RollcallError::MappingLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn save_err(&self, reason: impl ToString) -> RollcallError {
        RollcallError::MappingSave {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl MappingStore for JsonFileStore {
    fn load(&self) -> Result<Mapping, RollcallError> {
        if !self.path.exists() {
            let defaults = builtin::default_mapping();
            tracing::info!(path = %self.path.display(), "mapping file missing, seeding defaults");
            self.save(&defaults)?;
            return Ok(defaults);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.load_err(e))?;
        let mapping: Mapping = serde_json::from_str(&content).map_err(|e| self.load_err(e))?;
        tracing::debug!(entries = mapping.len(), path = %self.path.display(), "mapping loaded");
        Ok(mapping)
    }

    fn save(&self, mapping: &Mapping) -> Result<(), RollcallError> {
        // Write next to the target and rename over it so readers never see
        // a truncated file.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.save_err(e))?;

        let mut json = serde_json::to_string_pretty(mapping).map_err(|e| self.save_err(e))?;
        json.push('\n');

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.save_err(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.save_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.save_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.save_err(e.error))?;

        tracing::debug!(entries = mapping.len(), path = %self.path.display(), "mapping saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store, for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Mapping>>,
}

impl MemoryStore {
    /// An empty store; the first `load()` seeds it with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `mapping`.
    pub fn with_mapping(mapping: Mapping) -> Self {
        MemoryStore {
            inner: Mutex::new(Some(mapping)),
        }
    }

    fn poisoned() -> String {
        "mapping store lock poisoned".to_string()
    }
}

impl MappingStore for MemoryStore {
    fn load(&self) -> Result<Mapping, RollcallError> {
        let mut guard = self.inner.lock().map_err(|_| RollcallError::MappingLoad {
            path: PathBuf::from(self.location()),
            reason: Self::poisoned(),
        })?;
        Ok(guard.get_or_insert_with(builtin::default_mapping).clone())
    }

    fn save(&self, mapping: &Mapping) -> Result<(), RollcallError> {
        let mut guard = self.inner.lock().map_err(|_| RollcallError::MappingSave {
            path: PathBuf::from(self.location()),
            reason: Self::poisoned(),
        })?;
        *guard = Some(mapping.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut m = Mapping::new();
        m.insert("삼성", "Samsung Group");
        assert_eq!(m.insert("삼성", "Samsung"), Some("Samsung Group".into()));
        assert_eq!(m.get("삼성"), Some("Samsung"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_index_normalizes_alias_keys() {
        let m: Mapping = [("Samsung Elec", "Samsung")].into_iter().collect();
        let index = m.index();
        assert_eq!(index.get("samsungelec"), Some("Samsung"));
        assert_eq!(index.get("Samsung Elec"), None);
    }

    #[test]
    fn test_file_store_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mapping.json");
        let store = JsonFileStore::new(&path);

        let first = store.load().unwrap();
        assert_eq!(first, builtin::default_mapping());
        assert!(path.exists());

        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("mapping.json"));
        let m: Mapping = [("samsungelec", "Samsung"), ("엘지", "LG")].into_iter().collect();

        store.save(&m).unwrap();
        store.save(&m).unwrap();
        assert_eq!(store.load().unwrap(), m);

        // Non-ASCII aliases are stored verbatim.
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("엘지"));

        // Only the target file remains; the temp file was renamed away.
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, RollcallError::MappingLoad { .. }));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), builtin::default_mapping());

        let m: Mapping = [("x", "X")].into_iter().collect();
        store.save(&m).unwrap();
        assert_eq!(store.load().unwrap(), m);

        let seeded = MemoryStore::with_mapping(Mapping::new());
        assert!(seeded.load().unwrap().is_empty());
    }
}
