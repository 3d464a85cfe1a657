//! Conversion between a parameter bag and its transport forms: the typed
//! extra channel handed to the launcher, and the serialized envelope.

use crate::error::MarshalError;
use crate::marshal::codec::JsonCodec;
use std::sync::Arc;
use xrouter_api::{Extra, LaunchExtras, ParamCodec, ParamEnvelope, ParamMap, ParamValue, RouteRequest};

#[derive(Clone)]
pub struct Marshaller {
    codec: Arc<dyn ParamCodec>,
}

impl Default for Marshaller {
    fn default() -> Self {
        Self::new(Arc::new(JsonCodec))
    }
}

impl Marshaller {
    pub fn new(codec: Arc<dyn ParamCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &dyn ParamCodec {
        self.codec.as_ref()
    }

    /// Primitives go through the typed channel; everything else is encoded
    /// with the codec, one entry at a time.
    pub fn marshal(&self, params: &ParamMap) -> Result<LaunchExtras, MarshalError> {
        let mut extras = LaunchExtras::new();
        for (key, value) in params {
            let extra = match value {
                ParamValue::Text(s) => Extra::Text(s.clone()),
                ParamValue::Integer(i) => Extra::Integer(*i),
                ParamValue::Boolean(b) => Extra::Boolean(*b),
                ParamValue::Structured(_) => Extra::Serialized(self.encode(key, value)?),
            };
            extras.put(key.clone(), extra);
        }
        Ok(extras)
    }

    /// Inverse of [`Marshaller::marshal`]. Serialized entries come back as
    /// generic values.
    pub fn unmarshal(&self, extras: &LaunchExtras) -> Result<ParamMap, MarshalError> {
        let mut params = ParamMap::with_capacity(extras.len());
        for (key, extra) in extras.iter() {
            let value = match extra {
                Extra::Text(s) => ParamValue::Text(s.clone()),
                Extra::Integer(i) => ParamValue::Integer(*i),
                Extra::Boolean(b) => ParamValue::Boolean(*b),
                Extra::Serialized(text) => self.decode(key, text)?,
            };
            params.insert(key.to_string(), value);
        }
        Ok(params)
    }

    /// Opaque form of `request`: every value serialized independently, in
    /// parameter order.
    pub fn seal(&self, request: &RouteRequest) -> Result<ParamEnvelope, MarshalError> {
        let entries = request
            .params()
            .iter()
            .map(|(key, value)| self.encode(key, value).map(|text| (key.clone(), text)))
            .collect::<Result<Vec<_>, MarshalError>>()?;
        Ok(ParamEnvelope {
            path: request.path().to_string(),
            group: request.group().to_string(),
            entries,
        })
    }

    /// Rebuild a request from an envelope. Values are generic; receivers that
    /// know their type decode them further on injection.
    pub fn open(&self, envelope: &ParamEnvelope) -> Result<RouteRequest, MarshalError> {
        let mut params = ParamMap::with_capacity(envelope.entries.len());
        for (key, text) in &envelope.entries {
            params.insert(key.clone(), self.decode(key, text)?);
        }
        Ok(RouteRequest::from_parts(
            envelope.path.clone(),
            envelope.group.clone(),
            params,
        ))
    }

    fn encode(&self, key: &str, value: &ParamValue) -> Result<String, MarshalError> {
        self.codec
            .serialize(value)
            .map_err(|source| MarshalError::Serialize {
                key: key.to_string(),
                source,
            })
    }

    fn decode(&self, key: &str, text: &str) -> Result<ParamValue, MarshalError> {
        self.codec
            .deserialize(text)
            .map_err(|source| MarshalError::Deserialize {
                key: key.to_string(),
                source,
            })
    }
}
