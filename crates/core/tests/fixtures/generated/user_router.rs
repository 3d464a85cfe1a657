// @generated by xrouter-compiler for module `user`. Do not edit.

/// Route table `user$RouteTable_user`.
pub struct UserRouteTableUser;

impl ::xrouter_api::RouteTableProvider for UserRouteTableUser {
    fn name(&self) -> &str {
        "user$RouteTable_user"
    }

    fn module(&self) -> &str {
        "user"
    }

    fn group(&self) -> &str {
        "user"
    }

    fn route_map(&self) -> ::xrouter_api::RouteMap {
        let mut routes = ::xrouter_api::RouteMap::new();
        routes.insert(
            "/user".to_string(),
            ::xrouter_api::TargetDescriptor::of::<crate::UserHome>("user"),
        );
        routes.insert(
            "/user/settings".to_string(),
            ::xrouter_api::TargetDescriptor::of::<crate::UserSettings>("user"),
        );
        routes
    }
}

/// Service provider `Service_user$RouterService`.
pub struct ServiceUserRouterService;

impl ::xrouter_api::RouterServiceProvider for ServiceUserRouterService {
    fn name(&self) -> &str {
        "Service_user$RouterService"
    }

    fn module(&self) -> &str {
        "user"
    }

    fn registry(&self) -> &::xrouter_api::ServiceRegistry {
        static REGISTRY: ::std::sync::OnceLock<::xrouter_api::ServiceRegistry> =
            ::std::sync::OnceLock::new();
        REGISTRY.get_or_init(|| {
            let mut registry = ::xrouter_api::ServiceRegistry::new("user");
            registry.register(
                ::xrouter_api::ServiceDescriptor::new("/shared/greeter", "crate::UserGreeter")
                    .constructor(&[], |_args| {
                        Ok(::xrouter_api::ServiceInstance::new::<::std::sync::Arc<dyn crate::Greeter>>(
                            ::std::sync::Arc::new(<crate::UserGreeter as ::std::default::Default>::default()),
                        ))
                    }),
            );
            registry
        })
    }
}

/// Registers every provider generated for module `user`.
pub fn register(catalog: &mut ::xrouter_api::ProviderCatalog) {
    catalog.register_route_table(UserRouteTableUser);
    catalog.register_service_provider(ServiceUserRouterService);
}
