//! Merged route table of one group.
//!
//! Built once by discovery from every provider of the group and never mutated
//! afterwards, so lookups need no locking.

use crate::config::PrefixPolicy;
use std::collections::BTreeMap;
use tracing::warn;
use xrouter_api::{RouteMap, TargetDescriptor};

#[derive(Debug, Clone)]
pub struct RouteTable {
    group: String,
    routes: BTreeMap<String, TargetDescriptor>,
    /// Providers merged into this table, in merge order.
    providers: Vec<String>,
}

impl RouteTable {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            routes: BTreeMap::new(),
            providers: Vec::new(),
        }
    }

    /// Merge the map of one provider. Paths already present keep their
    /// earlier descriptor.
    pub fn merge(&mut self, provider: &str, routes: RouteMap) {
        self.providers.push(provider.to_string());
        for (path, descriptor) in routes {
            if let Some(existing) = self.routes.get(&path) {
                warn!(
                    "Path {} of group {} is declared again by {}; keeping {}",
                    path,
                    self.group,
                    provider,
                    existing.type_name()
                );
                continue;
            }
            self.routes.insert(path, descriptor);
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn get(&self, path: &str) -> Option<&TargetDescriptor> {
        self.routes.get(path)
    }

    /// Resolve `path`: an exact entry first, then the longest entry allowed by
    /// `policy`. Returns the matched key with its descriptor.
    pub fn lookup(&self, path: &str, policy: PrefixPolicy) -> Option<(&str, &TargetDescriptor)> {
        if let Some((key, descriptor)) = self.routes.get_key_value(path) {
            return Some((key.as_str(), descriptor));
        }
        if policy == PrefixPolicy::Exact {
            return None;
        }

        let mut best: Option<(&str, &TargetDescriptor)> = None;
        for (key, descriptor) in &self.routes {
            if key.is_empty() || !path.starts_with(key.as_str()) {
                continue;
            }
            if policy == PrefixPolicy::Segment && !ends_on_segment(key, path) {
                continue;
            }
            match best {
                Some((best_key, _)) if best_key.len() >= key.len() => {}
                _ => best = Some((key.as_str(), descriptor)),
            }
        }
        best
    }
}

/// `key` is a prefix of `path`; does it stop at a `/` boundary?
fn ends_on_segment(key: &str, path: &str) -> bool {
    let remainder = &path[key.len()..];
    remainder.is_empty() || remainder.starts_with('/') || key.ends_with('/')
}
