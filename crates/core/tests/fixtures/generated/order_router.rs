// @generated by xrouter-compiler for module `order`. Do not edit.

/// Route table `order$RouteTable_order`.
pub struct OrderRouteTableOrder;

impl ::xrouter_api::RouteTableProvider for OrderRouteTableOrder {
    fn name(&self) -> &str {
        "order$RouteTable_order"
    }

    fn module(&self) -> &str {
        "order"
    }

    fn group(&self) -> &str {
        "order"
    }

    fn route_map(&self) -> ::xrouter_api::RouteMap {
        let mut routes = ::xrouter_api::RouteMap::new();
        routes.insert(
            "/order/detail".to_string(),
            ::xrouter_api::TargetDescriptor::of::<crate::OrderDetail>("order"),
        );
        routes.insert(
            "/order/order".to_string(),
            ::xrouter_api::TargetDescriptor::from_factory::<crate::OrderServiceImpl>("order", crate::OrderServiceImpl::create),
        );
        routes
    }
}

/// Route table `order$RouteTable_pay`.
pub struct OrderRouteTablePay;

impl ::xrouter_api::RouteTableProvider for OrderRouteTablePay {
    fn name(&self) -> &str {
        "order$RouteTable_pay"
    }

    fn module(&self) -> &str {
        "order"
    }

    fn group(&self) -> &str {
        "pay"
    }

    fn route_map(&self) -> ::xrouter_api::RouteMap {
        let mut routes = ::xrouter_api::RouteMap::new();
        routes.insert(
            "/pay/home".to_string(),
            ::xrouter_api::TargetDescriptor::of::<crate::PayHome>("pay"),
        );
        routes
    }
}

/// Service provider `Service_order$RouterService`.
pub struct ServiceOrderRouterService;

impl ::xrouter_api::RouterServiceProvider for ServiceOrderRouterService {
    fn name(&self) -> &str {
        "Service_order$RouterService"
    }

    fn module(&self) -> &str {
        "order"
    }

    fn registry(&self) -> &::xrouter_api::ServiceRegistry {
        static REGISTRY: ::std::sync::OnceLock<::xrouter_api::ServiceRegistry> =
            ::std::sync::OnceLock::new();
        REGISTRY.get_or_init(|| {
            let mut registry = ::xrouter_api::ServiceRegistry::new("order");
            registry.register(
                ::xrouter_api::ServiceDescriptor::new("/order/order", "crate::OrderServiceImpl")
                    .constructor(&[], |_args| {
                        Ok(::xrouter_api::ServiceInstance::new::<::std::sync::Arc<dyn crate::OrderService>>(
                            ::std::sync::Arc::new(<crate::OrderServiceImpl as ::std::default::Default>::default()),
                        ))
                    })
                    .constructor(&[::xrouter_api::ParamKind::Text], |args| {
                        Ok(::xrouter_api::ServiceInstance::new::<::std::sync::Arc<dyn crate::OrderService>>(
                            ::std::sync::Arc::new(crate::OrderServiceImpl::with_name(args)?),
                        ))
                    }),
            );
            registry.register(
                ::xrouter_api::ServiceDescriptor::new("/shared/greeter", "crate::OrderGreeter")
                    .constructor(&[], |_args| {
                        Ok(::xrouter_api::ServiceInstance::new::<::std::sync::Arc<dyn crate::Greeter>>(
                            ::std::sync::Arc::new(<crate::OrderGreeter as ::std::default::Default>::default()),
                        ))
                    }),
            );
            registry
        })
    }
}

/// Registers every provider generated for module `order`.
pub fn register(catalog: &mut ::xrouter_api::ProviderCatalog) {
    catalog.register_route_table(OrderRouteTableOrder);
    catalog.register_route_table(OrderRouteTablePay);
    catalog.register_service_provider(ServiceOrderRouterService);
}
