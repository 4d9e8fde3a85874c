use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CullError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Asset not found in catalog: {0}")]
    AssetNotFound(PathBuf),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Record removal failed for {path}: {reason}")]
    RecordRemoval { path: PathBuf, reason: String },

    #[error("User input error: {0}")]
    UserInput(String),
}

impl From<dialoguer::Error> for CullError {
    fn from(err: dialoguer::Error) -> Self {
        CullError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CullError>;
