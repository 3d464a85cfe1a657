//! The runtime router.
//!
//! One explicit [`Router`] instance owns the interceptor chain, the dynamic
//! route overrides and the discovery cache. A dispatch runs, in order:
//! interceptors → resolve → marshal extras → construct → inject → launch.

use crate::config::RouterConfig;
use crate::discovery::RegistryDiscovery;
use crate::error::{Result, RouterError};
use crate::marshal::{InjectionReport, Marshaller, ParameterInjector};
use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info};
use xrouter_api::{
    BoxError, Interceptor, LaunchExtras, Launcher, ParamCodec, ProviderCatalog, RouteRequest,
    RouteTarget, TargetDescriptor,
};

/// Where a resolved route came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSource {
    Dynamic,
    Table { group: String },
}

/// A completed dispatch.
pub struct Navigation {
    /// Key that matched: the request path, or the table prefix it fell back to.
    pub matched: String,
    pub source: RouteSource,
    pub type_name: String,
    pub target: Box<dyn RouteTarget>,
    pub injection: InjectionReport,
}

impl Navigation {
    pub fn target<T: RouteTarget>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("matched", &self.matched)
            .field("source", &self.source)
            .field("type_name", &self.type_name)
            .field("injection", &self.injection)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum NavigationOutcome {
    Completed(Navigation),
    /// An interceptor vetoed the request. Not an error.
    Suppressed { interceptor: String },
    /// Nothing matched. Not an error; the caller picks a fallback.
    NotFound { path: String, group: String },
}

impl NavigationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, NavigationOutcome::Completed(_))
    }

    pub fn into_navigation(self) -> Option<Navigation> {
        match self {
            NavigationOutcome::Completed(navigation) => Some(navigation),
            _ => None,
        }
    }
}

/// Launcher used when the host does not provide one: logs and succeeds.
#[derive(Debug, Default)]
pub struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn start(&self, descriptor: &TargetDescriptor, extras: &LaunchExtras) -> std::result::Result<(), BoxError> {
        debug!(
            "Starting {} with {} extra(s)",
            descriptor.type_name(),
            extras.len()
        );
        Ok(())
    }
}

pub struct Router {
    pub(crate) discovery: RegistryDiscovery,
    dynamic: DashMap<String, TargetDescriptor>,
    interceptors: RwLock<Vec<Arc<dyn Interceptor>>>,
    launcher: Arc<dyn Launcher>,
    marshaller: Marshaller,
    config: RouterConfig,
}

impl Router {
    pub fn builder(catalog: impl Into<Arc<ProviderCatalog>>) -> RouterBuilder {
        RouterBuilder::new(catalog.into())
    }

    /// Router with the default launcher, codec and configuration.
    pub fn new(catalog: impl Into<Arc<ProviderCatalog>>) -> Self {
        Self::builder(catalog).build()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn discovery(&self) -> &RegistryDiscovery {
        &self.discovery
    }

    pub fn marshaller(&self) -> &Marshaller {
        &self.marshaller
    }

    /// Append an interceptor; interceptors run in registration order and
    /// cannot be removed.
    pub fn add_interceptor<I>(&self, interceptor: I)
    where
        I: Interceptor + 'static,
    {
        self.interceptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(interceptor));
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Override `path` for this router. Returns the override it replaced.
    pub fn register_route(&self, path: impl Into<String>, descriptor: TargetDescriptor) -> Option<TargetDescriptor> {
        let path = path.into();
        info!("Registered dynamic route {} -> {}", path, descriptor.type_name());
        self.dynamic.insert(path, descriptor)
    }

    pub fn unregister_route(&self, path: &str) -> Option<TargetDescriptor> {
        let removed = self.dynamic.remove(path).map(|(_, descriptor)| descriptor);
        if removed.is_some() {
            info!("Unregistered dynamic route {}", path);
        }
        removed
    }

    /// Paths with a dynamic override, sorted.
    pub fn registered_routes(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.dynamic.iter().map(|entry| entry.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Dispatch `request`.
    ///
    /// Suppression and misses are outcomes, not errors. Construction, launch
    /// and marshalling failures are errors and are logged here.
    pub fn navigate(&self, request: &RouteRequest) -> Result<NavigationOutcome> {
        for interceptor in self.interceptor_snapshot() {
            if interceptor.intercept(request) {
                info!(
                    "Navigation to {} suppressed by {}",
                    request.path(),
                    interceptor.name()
                );
                return Ok(NavigationOutcome::Suppressed {
                    interceptor: interceptor.name().to_string(),
                });
            }
        }

        let Some((matched, route_source, descriptor)) = self.resolve(request) else {
            info!(
                "No route for {} in group {}",
                request.path(),
                request.group()
            );
            return Ok(NavigationOutcome::NotFound {
                path: request.path().to_string(),
                group: request.group().to_string(),
            });
        };
        debug!(
            "Resolved {} to {} via {:?} ({})",
            request.path(),
            descriptor.type_name(),
            route_source,
            matched
        );

        let extras = self.marshaller.marshal(request.params()).map_err(|source| {
            error!("Failed to marshal parameters for {}: {}", request.path(), source);
            RouterError::Marshal {
                path: request.path().to_string(),
                source,
            }
        })?;

        let mut target = descriptor.construct().map_err(|source| {
            error!(
                "Failed to construct {} for {}: {}",
                descriptor.type_name(),
                request.path(),
                source
            );
            RouterError::Construct {
                path: request.path().to_string(),
                type_name: descriptor.type_name().to_string(),
                source,
            }
        })?;

        let injection = if self.config.inject_parameters {
            ParameterInjector::apply(target.as_mut(), request.params())
        } else {
            InjectionReport::default()
        };

        self.launcher.start(&descriptor, &extras).map_err(|source| {
            error!(
                "Failed to launch {} for {}: {}",
                descriptor.type_name(),
                request.path(),
                source
            );
            RouterError::Launch {
                path: request.path().to_string(),
                type_name: descriptor.type_name().to_string(),
                source,
            }
        })?;

        Ok(NavigationOutcome::Completed(Navigation {
            matched,
            source: route_source,
            type_name: descriptor.type_name().to_string(),
            target,
            injection,
        }))
    }

    /// Boolean form of [`Router::navigate`]: `true` only when the target was
    /// constructed and launched.
    pub fn go(&self, request: &RouteRequest) -> bool {
        matches!(self.navigate(request), Ok(NavigationOutcome::Completed(_)))
    }

    /// Dynamic overrides first (exact path), then the group's table.
    fn resolve(&self, request: &RouteRequest) -> Option<(String, RouteSource, TargetDescriptor)> {
        if let Some(descriptor) = self.dynamic.get(request.path()) {
            return Some((
                request.path().to_string(),
                RouteSource::Dynamic,
                descriptor.value().clone(),
            ));
        }

        let table = self.discovery.load_group(request.group())?;
        let (key, descriptor) = table.lookup(request.path(), self.config.prefix_policy)?;
        Some((
            key.to_string(),
            RouteSource::Table {
                group: table.group().to_string(),
            },
            descriptor.clone(),
        ))
    }

    fn interceptor_snapshot(&self) -> Vec<Arc<dyn Interceptor>> {
        self.interceptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("catalog", self.discovery.catalog())
            .field("dynamic_routes", &self.registered_routes())
            .field("interceptors", &self.interceptor_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

pub struct RouterBuilder {
    catalog: Arc<ProviderCatalog>,
    launcher: Option<Arc<dyn Launcher>>,
    codec: Option<Arc<dyn ParamCodec>>,
    config: RouterConfig,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RouterBuilder {
    pub fn new(catalog: Arc<ProviderCatalog>) -> Self {
        Self {
            catalog,
            launcher: None,
            codec: None,
            config: RouterConfig::default(),
            interceptors: Vec::new(),
        }
    }

    pub fn launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn codec(mut self, codec: Arc<dyn ParamCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: Interceptor + 'static,
    {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> Router {
        let marshaller = match self.codec {
            Some(codec) => Marshaller::new(codec),
            None => Marshaller::default(),
        };
        Router {
            discovery: RegistryDiscovery::new(self.catalog),
            dynamic: DashMap::new(),
            interceptors: RwLock::new(self.interceptors),
            launcher: self.launcher.unwrap_or_else(|| Arc::new(NoopLauncher)),
            marshaller,
            config: self.config,
        }
    }
}
