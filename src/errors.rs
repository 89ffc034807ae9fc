use std::path::PathBuf;

use yaml_rust::Yaml;

#[derive(Debug, thiserror::Error)]
pub enum CraterError {
    #[error("Invalid radial range: {0}")]
    InvalidRange(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Could not read simulation state: {0}")]
    StateRead(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CraterError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CraterError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, CraterError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required parameter in configuration: {0}")]
    MissingParameter(String),

    #[error("Unknown type of seeding configured: {0}")]
    UnknownSeeding(String),

    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(String, Yaml),

    #[error("Could not parse configuration: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
}
