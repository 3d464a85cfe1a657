pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod marshal;
pub mod router;
pub mod routing;
pub mod service;

pub use config::{PrefixPolicy, RouterConfig};
pub use discovery::{LoadedProvider, ProviderKind, RegistryDiscovery};
pub use error::{MarshalError, Result, RouterError};
pub use logging::init_logging;
pub use marshal::{InjectionReport, JsonCodec, Marshaller, ParameterInjector};
pub use router::{Navigation, NavigationOutcome, NoopLauncher, RouteSource, Router, RouterBuilder};
pub use routing::RouteTable;
