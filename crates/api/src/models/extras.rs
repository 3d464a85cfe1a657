use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of the typed extra channel handed to a [`crate::Launcher`].
///
/// Primitives keep their type; everything else is carried as codec text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Extra {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Serialized(String),
}

/// Marshalled parameters as seen by the external "start target" call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchExtras {
    entries: IndexMap<String, Extra>,
}

impl LaunchExtras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, extra: Extra) {
        self.entries.insert(key.into(), extra);
    }

    pub fn get(&self, key: &str) -> Option<&Extra> {
        self.entries.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Extra::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(Extra::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(Extra::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Extra)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Opaque form of a request for persistence or a process hop: every value is
/// serialized independently, in parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamEnvelope {
    pub path: String,
    pub group: String,
    pub entries: Vec<(String, String)>,
}
