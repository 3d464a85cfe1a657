use super::value::{ParamMap, ParamValue};

/// A navigation request: logical path, group and a parameter bag.
///
/// Path and group are fixed at construction; parameters are appended until the
/// request is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    path: String,
    group: String,
    params: ParamMap,
}

impl RouteRequest {
    pub fn new(path: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: group.into(),
            params: ParamMap::new(),
        }
    }

    /// Rebuild a request from parts (used when opening an envelope).
    pub fn from_parts(path: impl Into<String>, group: impl Into<String>, params: ParamMap) -> Self {
        Self {
            path: path.into(),
            group: group.into(),
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Insert or replace a parameter.
    pub fn put_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Builder form of [`RouteRequest::put_param`].
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.put_param(key, value);
        self
    }
}
