//! Naming convention shared by the registry compiler and runtime discovery.
//!
//! The generated provider names are the only coupling between the two phases:
//! - route tables: `<module>$RouteTable_<group>`
//! - service providers: `Service_<module>$RouterService`

use std::fmt;

pub const ROUTE_TABLE_MARKER: &str = "$RouteTable_";
pub const SERVICE_PREFIX: &str = "Service_";
pub const SERVICE_SUFFIX: &str = "$RouterService";

pub fn route_table_name(module: &str, group: &str) -> String {
    format!("{module}{ROUTE_TABLE_MARKER}{group}")
}

pub fn service_provider_name(module: &str) -> String {
    format!("{SERVICE_PREFIX}{module}{SERVICE_SUFFIX}")
}

/// Module and group names are ASCII letters, digits or `_`, not starting with
/// a digit, so that every provider name maps to a valid identifier.
pub fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parsed provider name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderName {
    RouteTable { module: String, group: String },
    Service { module: String },
}

impl ProviderName {
    pub fn parse(name: &str) -> Option<Self> {
        let service_module = name
            .strip_prefix(SERVICE_PREFIX)
            .and_then(|rest| rest.strip_suffix(SERVICE_SUFFIX));
        if let Some(module) = service_module {
            return is_valid_segment(module).then(|| ProviderName::Service {
                module: module.to_string(),
            });
        }

        let (module, group) = name.split_once(ROUTE_TABLE_MARKER)?;
        if is_valid_segment(module) && is_valid_segment(group) {
            Some(ProviderName::RouteTable {
                module: module.to_string(),
                group: group.to_string(),
            })
        } else {
            None
        }
    }

    pub fn module(&self) -> &str {
        match self {
            ProviderName::RouteTable { module, .. } | ProviderName::Service { module } => module,
        }
    }

    /// Whether this is the route table of `group` (any module).
    pub fn is_table_of(&self, group: &str) -> bool {
        matches!(self, ProviderName::RouteTable { group: g, .. } if g == group)
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::RouteTable { module, group } => {
                f.write_str(&route_table_name(module, group))
            }
            ProviderName::Service { module } => f.write_str(&service_provider_name(module)),
        }
    }
}
