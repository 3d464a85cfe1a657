//! Validated, grouped view of the declarations of one module.

use std::collections::BTreeMap;
use std::path::PathBuf;
use xrouter_api::ParamKind;
use xrouter_api::naming::{route_table_name, service_provider_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    pub path: String,
    pub target: String,
    pub factory: Option<String>,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledConstructor {
    pub signature: Vec<ParamKind>,
    pub function: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledService {
    pub path: String,
    pub target: String,
    pub interface: Option<String>,
    /// Never empty: a service without declared constructors gets the default one.
    pub constructors: Vec<CompiledConstructor>,
    pub source: PathBuf,
}

impl CompiledService {
    /// Type the instance is published as.
    pub fn published_type(&self) -> &str {
        self.interface.as_deref().unwrap_or(&self.target)
    }
}

/// Everything generated for one module. All maps are ordered so the rendered
/// output only depends on the declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledModule {
    pub module: String,
    /// group → path → route
    pub groups: BTreeMap<String, BTreeMap<String, CompiledRoute>>,
    /// path → service
    pub services: BTreeMap<String, CompiledService>,
}

impl CompiledModule {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Default::default()
        }
    }

    pub fn table_names(&self) -> impl Iterator<Item = String> + '_ {
        self.groups
            .keys()
            .map(|group| route_table_name(&self.module, group))
    }

    pub fn service_provider_name(&self) -> Option<String> {
        (!self.services.is_empty()).then(|| service_provider_name(&self.module))
    }

    pub fn route_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.services.is_empty()
    }
}
