//! Provider traits implemented by generated code, and the catalog they are
//! registered into.

use crate::error::ServiceResult;
use crate::models::{ParamKind, ParamValue, ServiceInstance, ServiceRegistry, TargetDescriptor};
use std::collections::BTreeMap;
use std::sync::Arc;

/// `path → descriptor` mapping of one group.
pub type RouteMap = BTreeMap<String, TargetDescriptor>;

/// Generated table of one `{module, group}` pair.
pub trait RouteTableProvider: Send + Sync {
    /// Convention name, `<module>$RouteTable_<group>`.
    fn name(&self) -> &str;

    fn module(&self) -> &str;

    fn group(&self) -> &str;

    /// Build the mapping. Called once per group by discovery, then cached.
    fn route_map(&self) -> RouteMap;
}

/// Generated service provider of one module.
pub trait RouterServiceProvider: Send + Sync {
    /// Convention name, `Service_<module>$RouterService`.
    fn name(&self) -> &str;

    fn module(&self) -> &str;

    fn registry(&self) -> &ServiceRegistry;

    /// `None` when this module does not publish `path`.
    fn new_service_instance(
        &self,
        path: &str,
        signature: &[ParamKind],
        args: &[ParamValue],
    ) -> Option<ServiceResult<ServiceInstance>> {
        self.registry().new_service_instance(path, signature, args)
    }
}

/// Index of every provider linked into the process.
///
/// Generated `register` functions append to it; registration order is the
/// resolution order for duplicated paths.
#[derive(Default, Clone)]
pub struct ProviderCatalog {
    route_tables: Vec<Arc<dyn RouteTableProvider>>,
    service_providers: Vec<Arc<dyn RouterServiceProvider>>,
}

impl ProviderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from one or more generated `register` functions.
    pub fn from_registrars(registrars: &[fn(&mut ProviderCatalog)]) -> Self {
        let mut catalog = Self::new();
        for register in registrars {
            register(&mut catalog);
        }
        catalog
    }

    pub fn register_route_table<P>(&mut self, provider: P) -> &mut Self
    where
        P: RouteTableProvider + 'static,
    {
        self.route_tables.push(Arc::new(provider));
        self
    }

    pub fn register_service_provider<P>(&mut self, provider: P) -> &mut Self
    where
        P: RouterServiceProvider + 'static,
    {
        self.service_providers.push(Arc::new(provider));
        self
    }

    pub fn route_tables(&self) -> &[Arc<dyn RouteTableProvider>] {
        &self.route_tables
    }

    pub fn service_providers(&self) -> &[Arc<dyn RouterServiceProvider>] {
        &self.service_providers
    }

    pub fn is_empty(&self) -> bool {
        self.route_tables.is_empty() && self.service_providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables: Vec<&str> = self.route_tables.iter().map(|p| p.name()).collect();
        let services: Vec<&str> = self.service_providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ProviderCatalog")
            .field("route_tables", &tables)
            .field("service_providers", &services)
            .finish()
    }
}
