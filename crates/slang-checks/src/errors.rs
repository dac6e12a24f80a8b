use slang_api::SlangError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running checks
#[derive(Error, Debug)]
pub enum CheckError {
    /// Failed to read a configuration file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// Configuration file is not valid JSON for `ChecksConfig`
    #[error("Malformed configuration in {0}: {1}")]
    MalformedConfig(PathBuf, #[source] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool could not be created
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    /// Conversion or tree error
    #[error(transparent)]
    Tree(#[from] SlangError),
}

/// Result type for check operations
pub type CheckResult<T> = Result<T, CheckError>;
