use crate::models::ParamKind;

/// Error type used at every collaborator seam (factories, launchers, codecs).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service {path} has no constructor with signature {signature:?}")]
    NoConstructor {
        path: String,
        signature: Vec<ParamKind>,
    },
    #[error("service {path} expects {expected} arguments, got {found}")]
    ArgumentCount {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of service {path} expected {expected:?}, found {found:?}")]
    ArgumentMismatch {
        path: String,
        index: usize,
        expected: ParamKind,
        found: Option<ParamKind>,
    },
    #[error("failed to construct service {path} ({type_name}): {source}")]
    Construct {
        path: String,
        type_name: String,
        #[source]
        source: BoxError,
    },
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
