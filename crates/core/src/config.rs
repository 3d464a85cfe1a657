use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How a request path matches table entries when there is no exact entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixPolicy {
    /// Exact matches only.
    Exact,
    /// Longest entry that is a plain string prefix of the path, so `/user`
    /// also matches `/username`.
    #[default]
    Prefix,
    /// Longest entry that is a prefix ending on a `/` boundary, so `/user`
    /// matches `/user/profile` but not `/username`.
    Segment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub prefix_policy: PrefixPolicy,
    /// Populate parameter receivers of constructed targets.
    pub inject_parameters: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix_policy: PrefixPolicy::default(),
            inject_parameters: true,
        }
    }
}

impl RouterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
