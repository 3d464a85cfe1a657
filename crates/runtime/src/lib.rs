//! Facade crate: the contracts generated code implements plus the runtime
//! router, behind one dependency.
//!
//! Generated providers can target this crate directly by compiling with
//! `api_crate = "::xrouter"`.

pub use xrouter_api::*;
pub use xrouter_core::{
    InjectionReport, JsonCodec, MarshalError, Navigation, NavigationOutcome, NoopLauncher,
    PrefixPolicy, RouteSource, Router, RouterBuilder, RouterConfig, RouterError,
};

use std::sync::Arc;

/// Include the aggregate file written by `xrouter_compiler::build::generate`
/// into `OUT_DIR`. Brings `register_all` into scope.
#[macro_export]
macro_rules! include_providers {
    () => {
        include!(concat!(env!("OUT_DIR"), "/xrouter_providers.rs"));
    };
    ($file:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $file));
    };
}

/// Bootstraps a router over every provider the given `register` functions
/// contribute, in order. Earlier registrars win duplicated service paths.
pub fn build_router(registrars: &[fn(&mut ProviderCatalog)]) -> Router {
    build_router_with(registrars, RouterConfig::default(), None)
}

/// Like [`build_router`], with explicit configuration and launcher.
pub fn build_router_with(
    registrars: &[fn(&mut ProviderCatalog)],
    config: RouterConfig,
    launcher: Option<Arc<dyn Launcher>>,
) -> Router {
    let catalog = ProviderCatalog::from_registrars(registrars);
    if catalog.is_empty() {
        tracing::warn!("No route providers registered");
    } else {
        tracing::info!(
            "Router bootstrapped with {} route table(s) and {} service provider(s)",
            catalog.route_tables().len(),
            catalog.service_providers().len()
        );
    }

    let mut builder = Router::builder(catalog).config(config);
    if let Some(launcher) = launcher {
        builder = builder.launcher(launcher);
    }
    builder.build()
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module and also logs to stderr.
pub fn init_logging(component: &str) -> Option<impl Drop> {
    Some(xrouter_core::logging::init_logging(component, true))
}
