use std::path::PathBuf;
use thiserror::Error;

pub type PlugcheckResult<T> = Result<T, PlugcheckError>;

#[derive(Error, Debug)]
pub enum PlugcheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    /// The lock file or manifest could not be opened.
    #[error("open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the lock file stream failed part way through.
    #[error("read {}: {source}", path.display())]
    LockRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse manifest: {0}")]
    ManifestParse(String),

    #[error("add replace: {0}")]
    ManifestEdit(String),

    #[error("write manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Incompatibilities were reported and none were fixed.
    #[error("{0} incompatibilities found")]
    Incompatible(usize),

    /// Some incompatibilities were fixed, the rest cannot be fixed by editing the manifest.
    #[error("{fixed} incompatibilities fixed, {left} left")]
    PartiallyFixed { fixed: usize, left: usize },
}
