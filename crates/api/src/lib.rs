pub mod codec;
pub mod error;
pub mod interceptor;
pub mod launcher;
pub mod models;
pub mod naming;
pub mod provider;

// Re-export commonly used types
pub use codec::ParamCodec;
pub use error::{BoxError, ServiceError};
pub use interceptor::Interceptor;
pub use launcher::Launcher;
pub use models::*;
pub use naming::{ProviderName, route_table_name, service_provider_name};
pub use provider::{ProviderCatalog, RouteMap, RouteTableProvider, RouterServiceProvider};
