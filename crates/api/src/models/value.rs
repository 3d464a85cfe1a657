use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Parameter bag attached to a request. Keys are unique; insertion order is
/// only kept so envelopes serialize in a stable order.
pub type ParamMap = IndexMap<String, ParamValue>;

/// Kind tag of a [`ParamValue`]; also used as constructor signature element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Text,
    Integer,
    Boolean,
    Structured,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Structured => "structured",
        }
    }

    /// Primitive kinds travel through the typed extra channel; the rest is serialized.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ParamKind::Structured)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    /// Anything that is not a primitive, kept as a generic JSON value.
    Structured(Value),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Integer(_) => ParamKind::Integer,
            ParamValue::Boolean(_) => ParamKind::Boolean,
            ParamValue::Structured(_) => ParamKind::Structured,
        }
    }

    /// Wrap any serializable value as a structured parameter.
    pub fn structured<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(ParamValue::Structured)
    }

    /// Generic reconstruction used on the receiving side of a serialization
    /// boundary: primitives map back to their variants, everything else stays
    /// structured.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => ParamValue::Text(s),
            Value::Bool(b) => ParamValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => ParamValue::Structured(Value::Number(n)),
            },
            other => ParamValue::Structured(other),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Text(s) => Value::String(s.clone()),
            ParamValue::Integer(i) => Value::from(*i),
            ParamValue::Boolean(b) => Value::Bool(*b),
            ParamValue::Structured(v) => v.clone(),
        }
    }

    /// Decode into a concrete type when the receiver knows what it expects.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Structured(value)
    }
}

/// Check that `args` line up with a constructor signature; returns the first
/// offending position.
pub fn first_mismatch(signature: &[ParamKind], args: &[ParamValue]) -> Option<(usize, ParamKind, Option<ParamKind>)> {
    for (index, expected) in signature.iter().enumerate() {
        let found = args.get(index).map(ParamValue::kind);
        if found != Some(*expected) {
            return Some((index, *expected, found));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_restores_primitives() {
        assert_eq!(ParamValue::from_json(json!("a")), ParamValue::Text("a".into()));
        assert_eq!(ParamValue::from_json(json!(7)), ParamValue::Integer(7));
        assert_eq!(ParamValue::from_json(json!(true)), ParamValue::Boolean(true));
        assert_eq!(
            ParamValue::from_json(json!(1.5)),
            ParamValue::Structured(json!(1.5))
        );
        assert_eq!(
            ParamValue::from_json(json!({"id": 1})),
            ParamValue::Structured(json!({"id": 1}))
        );
    }

    #[test]
    fn test_decode_structured() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Address {
            city: String,
        }

        let value = ParamValue::structured(&Address {
            city: "Lyon".into(),
        })
        .unwrap();
        assert_eq!(value.kind(), ParamKind::Structured);
        let back: Address = value.decode().unwrap();
        assert_eq!(back.city, "Lyon");
    }

    #[test]
    fn test_first_mismatch() {
        let sig = [ParamKind::Text, ParamKind::Integer];
        assert_eq!(first_mismatch(&sig, &["a".into(), 1.into()]), None);
        assert_eq!(
            first_mismatch(&sig, &["a".into(), true.into()]),
            Some((1, ParamKind::Integer, Some(ParamKind::Boolean)))
        );
        assert_eq!(
            first_mismatch(&sig, &["a".into()]),
            Some((1, ParamKind::Integer, None))
        );
    }
}
