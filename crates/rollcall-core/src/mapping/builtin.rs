use super::Mapping;
use std::sync::LazyLock;

const DEFAULT_MAPPING_JSON: &str = include_str!("../../../../data/default-mapping.json");

static DEFAULT_MAPPING: LazyLock<Mapping> = LazyLock::new(|| {
    serde_json::from_str(DEFAULT_MAPPING_JSON).expect("embedded default-mapping.json is valid")
});

/// The alias table a fresh store is seeded with.
pub fn default_mapping() -> Mapping {
    DEFAULT_MAPPING.clone()
}
