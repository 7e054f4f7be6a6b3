use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerbumpError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid field value: {0}")]
    InvalidField(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, VerbumpError>;
