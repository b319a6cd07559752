//! Error types for the fallible edges of the crate.
//!
//! Store operations themselves are total. Errors only arise at the
//! persistence boundary, when loading configuration, and when parsing
//! labels from strings.

use std::{io::Error as StdError, path::PathBuf};

use {serde_json::Error as SerdeJsonError, thiserror::Error};

/// Error type for key-value persistence operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write the backing file.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: StdError,
    },
    /// The backing file is not a flat JSON object of strings.
    #[error("Malformed storage file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: SerdeJsonError,
    },
    /// No location could be determined for the storage file.
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// Error type for loading [`crate::StoresConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to deserialize the config file.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// A value parsed but is not usable.
    #[error("Invalid config value: {reason}")]
    InvalidValue { reason: String },
}

/// A string that does not name one of the known themes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme: {0:?}")]
pub struct ParseThemeError(pub String);

/// A string that does not name one of the known routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown route: {0:?}")]
pub struct ParseRouteError(pub String);
