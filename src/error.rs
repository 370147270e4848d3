//! Error types for disk-mgr
//!
//! Every failure the tool can report is a variant of [`DiskError`]; the CLI
//! prints its `Display` form and exits non-zero.

use thiserror::Error;

/// Result type alias for disk-mgr operations
pub type Result<T> = std::result::Result<T, DiskError>;

/// Main error type
#[derive(Error, Debug)]
pub enum DiskError {
    /// Search string matched no device by any strategy
    #[error("Could not find device '{0}'")]
    NotFound(String),

    /// Several devices share a label and no name match disambiguated them
    #[error(
        "More than one device [{}] with label '{label}', specify one by device name",
        .candidates.join(",")
    )]
    AmbiguousLabel {
        label: String,
        candidates: Vec<String>,
    },

    /// Device already has a mountpoint
    #[error("Device '{device}' is already mounted to '{mountpoint}'")]
    AlreadyMounted { device: String, mountpoint: String },

    /// Device has no mountpoint
    #[error("Device '{0}' is not mounted")]
    NotMounted(String),

    /// Command execution failed
    #[error("Command '{cmd}' failed with exit code {code}: {stderr}")]
    CommandFailed {
        cmd: String,
        code: i32,
        stderr: String,
    },

    /// An alias with this name is already stored
    #[error("Alias already exists [{alias} -> {uuid}]")]
    AliasExists { alias: String, uuid: String },

    /// No alias with this name is stored
    #[error("Could not find alias '{0}'")]
    AliasNotFound(String),

    /// Required arguments missing
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Device cannot be aliased because it carries no filesystem UUID
    #[error("Device '{0}' has no filesystem UUID, an alias needs one")]
    MissingUuid(String),

    /// Device inventory could not be read
    #[error("Read device info failed: {0}")]
    Inventory(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiskError {
    /// Create an invalid-arguments error
    pub fn invalid_args<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create an inventory error
    pub fn inventory<S: Into<String>>(msg: S) -> Self {
        Self::Inventory(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Check if the error is a violated precondition rather than a system failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::AmbiguousLabel { .. }
                | Self::AlreadyMounted { .. }
                | Self::NotMounted(_)
                | Self::AliasExists { .. }
                | Self::AliasNotFound(_)
                | Self::InvalidArguments(_)
                | Self::MissingUuid(_)
        )
    }
}
