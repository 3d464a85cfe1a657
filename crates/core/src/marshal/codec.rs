use xrouter_api::{BoxError, ParamCodec, ParamValue};

/// Default [`ParamCodec`]: JSON text via `serde_json`.
///
/// Decoding is generic: JSON strings, booleans and integers come back as the
/// matching primitive, anything else as [`ParamValue::Structured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ParamCodec for JsonCodec {
    fn serialize(&self, value: &ParamValue) -> Result<String, BoxError> {
        Ok(serde_json::to_string(&value.to_json())?)
    }

    fn deserialize(&self, text: &str) -> Result<ParamValue, BoxError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(ParamValue::from_json(value))
    }
}
