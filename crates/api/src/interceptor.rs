use crate::models::RouteRequest;

/// Policy hook run before resolution. Returning `true` vetoes the navigation.
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn intercept(&self, request: &RouteRequest) -> bool;
}

impl<F> Interceptor for F
where
    F: Fn(&RouteRequest) -> bool + Send + Sync,
{
    fn intercept(&self, request: &RouteRequest) -> bool {
        self(request)
    }
}
