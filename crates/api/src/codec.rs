use crate::error::BoxError;
use crate::models::ParamValue;

/// Text codec used for parameter values that cross a serialization boundary.
pub trait ParamCodec: Send + Sync {
    fn serialize(&self, value: &ParamValue) -> Result<String, BoxError>;

    /// Inverse of [`ParamCodec::serialize`]. Without a declared target type the
    /// result is a generic value.
    fn deserialize(&self, text: &str) -> Result<ParamValue, BoxError>;
}
