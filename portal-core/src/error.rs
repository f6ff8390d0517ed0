//! Error types for portal-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from catalog configuration operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path, embedded defaults).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, including file path and line context from serde_yaml.
    #[error("failed to parse message catalog at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`; cannot locate `~/.mobportals/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The catalog YAML file did not exist at the expected path.
    #[error("message catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },
}
