use thiserror::Error;
use xrouter_api::{BoxError, ServiceError};

#[derive(Error, Debug)]
pub enum MarshalError {
    #[error("failed to serialize parameter `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to deserialize parameter `{key}`: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("failed to construct target `{type_name}` for {path}: {source}")]
    Construct {
        path: String,
        type_name: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to launch target `{type_name}` for {path}: {source}")]
    Launch {
        path: String,
        type_name: String,
        #[source]
        source: BoxError,
    },
    #[error("parameter marshalling failed for {path}: {source}")]
    Marshal {
        path: String,
        #[source]
        source: MarshalError,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("service {path} is a `{found}`, not a `{expected}`")]
    ServiceType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid router configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouterError>;
