//! Registry discovery: lazy, per-group loading of generated providers.
//!
//! Providers are found through the [`ProviderCatalog`] by convention name
//! only. Nothing is loaded up front; the first request for a group scans the
//! catalog for `*$RouteTable_<group>` providers, merges them into one
//! [`RouteTable`] and caches it. Groups no provider is named after are
//! answered from the catalog's name set and never enter the cache.

use crate::routing::RouteTable;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};
use xrouter_api::{ProviderCatalog, ProviderName, RouterServiceProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Key is a group name.
    RouteTable,
    /// Key is a module name.
    Service,
}

/// What [`RegistryDiscovery::load`] found.
#[derive(Clone)]
pub enum LoadedProvider {
    RouteTable(Arc<RouteTable>),
    Service(Arc<dyn RouterServiceProvider>),
}

type GroupSlot = Arc<OnceCell<Option<Arc<RouteTable>>>>;

pub struct RegistryDiscovery {
    catalog: Arc<ProviderCatalog>,
    /// Groups named by at least one route table provider.
    known_groups: HashSet<String>,
    groups: DashMap<String, GroupSlot>,
    scans: AtomicUsize,
}

impl RegistryDiscovery {
    pub fn new(catalog: Arc<ProviderCatalog>) -> Self {
        let known_groups = catalog
            .route_tables()
            .iter()
            .filter_map(|provider| match ProviderName::parse(provider.name()) {
                Some(ProviderName::RouteTable { group, .. }) => Some(group),
                _ => None,
            })
            .collect();
        Self {
            catalog,
            known_groups,
            groups: DashMap::new(),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// `load(kind, key) → provider | absent`. Absence is a normal result.
    pub fn load(&self, kind: ProviderKind, key: &str) -> Option<LoadedProvider> {
        match kind {
            ProviderKind::RouteTable => self.load_group(key).map(LoadedProvider::RouteTable),
            ProviderKind::Service => self.load_service_provider(key).map(LoadedProvider::Service),
        }
    }

    /// Table of `group`, loading it on first use.
    ///
    /// Concurrent first loads of the same group run the scan once; later
    /// calls only read the cache.
    pub fn load_group(&self, group: &str) -> Option<Arc<RouteTable>> {
        if !self.known_groups.contains(group) {
            debug!("No route table provider for group {}", group);
            return None;
        }

        // Clone the slot out so the map shard is not locked during the scan.
        let slot = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if let Some(cached) = slot.get() {
            debug!("Route table cache hit for group {}", group);
            return cached.clone();
        }

        slot.get_or_init(|| self.scan_group(group)).clone()
    }

    fn scan_group(&self, group: &str) -> Option<Arc<RouteTable>> {
        self.scans.fetch_add(1, Ordering::Relaxed);
        let mut table = RouteTable::new(group);

        for provider in self.catalog.route_tables() {
            let matches = ProviderName::parse(provider.name()).is_some_and(|name| name.is_table_of(group));
            if !matches {
                continue;
            }
            debug!("Loading route table provider {}", provider.name());
            table.merge(provider.name(), provider.route_map());
        }

        if table.providers().is_empty() {
            info!("No route table for group {}", group);
            return None;
        }

        info!(
            "Loaded group {}: {} routes from {} provider(s)",
            group,
            table.len(),
            table.providers().len()
        );
        Some(Arc::new(table))
    }

    /// Service provider of `module`, looked up by convention name.
    pub fn load_service_provider(&self, module: &str) -> Option<Arc<dyn RouterServiceProvider>> {
        self.catalog
            .service_providers()
            .iter()
            .find(|provider| {
                matches!(
                    ProviderName::parse(provider.name()),
                    Some(ProviderName::Service { module: ref m }) if m == module
                )
            })
            .cloned()
    }

    /// Every service provider, in registration order.
    pub fn service_providers(&self) -> impl Iterator<Item = &Arc<dyn RouterServiceProvider>> {
        self.catalog
            .service_providers()
            .iter()
            .filter(|provider| matches!(ProviderName::parse(provider.name()), Some(ProviderName::Service { .. })))
    }

    /// Groups loaded so far (with or without a table), sorted.
    pub fn loaded_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self
            .groups
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .map(|entry| entry.key().clone())
            .collect();
        groups.sort();
        groups
    }

    /// Number of catalog scans performed.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}
