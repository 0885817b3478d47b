//! Error types for podgen

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Cluster configuration or credentials could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The cluster rejected the creation request or could not be reached
    #[error("Failed to create {kind}/{name} in namespace {namespace}: {source}")]
    SinkError {
        kind: String,
        name: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// HTTP status returned by the API server, if the failure came from one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::SinkError {
                source: kube::Error::Api(resp),
                ..
            } => Some(resp.code),
            _ => None,
        }
    }

    /// True when the API server refused the create because the name is taken
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
