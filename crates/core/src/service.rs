//! Service locator: path-addressed services published by generated
//! `Service_<module>$RouterService` providers.
//!
//! Providers are asked in catalog registration order and the first instance
//! produced wins, so a path published by several modules resolves to the
//! module registered first. A module that publishes the path but cannot build
//! it (wrong signature, failing constructor) passes the request on to the
//! next module.

use crate::error::{Result, RouterError};
use crate::router::Router;
use std::any::Any;
use tracing::{debug, error};
use xrouter_api::{ParamKind, ParamValue, ServiceError, ServiceInstance};

impl Router {
    /// Construct the service published under `path` with the constructor
    /// matching `signature`.
    ///
    /// `Ok(None)` when no module publishes the path. When modules publish it
    /// but none of them can build it, the last failure is returned.
    pub fn get_service(
        &self,
        path: &str,
        signature: &[ParamKind],
        args: &[ParamValue],
    ) -> Result<Option<ServiceInstance>> {
        let mut last_failure: Option<ServiceError> = None;

        for provider in self.discovery.service_providers() {
            match provider.new_service_instance(path, signature, args) {
                None => continue,
                Some(Ok(instance)) => {
                    debug!(
                        "Service {} provided by module {} as {}",
                        path,
                        provider.module(),
                        instance.type_name()
                    );
                    return Ok(Some(instance));
                }
                Some(Err(e)) => {
                    error!("Service {} of module {} failed: {}", path, provider.module(), e);
                    last_failure = Some(e);
                }
            }
        }

        match last_failure {
            Some(e) => Err(e.into()),
            None => {
                debug!("No module publishes service {}", path);
                Ok(None)
            }
        }
    }

    /// Default-constructed service, downcast to `T`, usually
    /// `Arc<dyn SomeService>`.
    pub fn service<T: Any>(&self, path: &str) -> Result<Option<T>> {
        self.service_with(path, &[], &[])
    }

    pub fn service_with<T: Any>(
        &self,
        path: &str,
        signature: &[ParamKind],
        args: &[ParamValue],
    ) -> Result<Option<T>> {
        let Some(instance) = self.get_service(path, signature, args)? else {
            return Ok(None);
        };
        instance
            .downcast::<T>()
            .map(Some)
            .map_err(|instance| RouterError::ServiceType {
                path: path.to_string(),
                expected: std::any::type_name::<T>(),
                found: instance.type_name(),
            })
    }

    /// Paths published by every discoverable module, as `(module, path)` in
    /// registration order.
    pub fn service_paths(&self) -> Vec<(String, String)> {
        self.discovery
            .service_providers()
            .flat_map(|provider| {
                let module = provider.module().to_string();
                provider
                    .registry()
                    .paths()
                    .map(move |path| (module.clone(), path.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
