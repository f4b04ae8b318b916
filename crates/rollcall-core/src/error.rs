use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    #[error("failed to read workbook: {0}")]
    Ingest(String),

    #[error("failed to read sheet '{sheet}': {reason}")]
    SheetRead { sheet: String, reason: String },

    #[error("unsupported input format '{0}'. Supported formats: xlsx, xlsm, xlsb, xls, ods, csv")]
    UnsupportedFormat(String),

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("failed to load mapping from {path}: {reason}")]
    MappingLoad { path: PathBuf, reason: String },

    #[error("failed to save mapping to {path}: {reason}")]
    MappingSave { path: PathBuf, reason: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("failed to write workbook: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
