pub mod extras;
pub mod request;
pub mod service;
pub mod target;
pub mod value;

pub use extras::{Extra, LaunchExtras, ParamEnvelope};
pub use request::RouteRequest;
pub use service::{ServiceConstructor, ServiceDescriptor, ServiceInstance, ServiceRegistry};
pub use target::{
    AsAny, DecodeSlot, ParamReceiver, ParamSlot, RouteTarget, TargetDescriptor, TargetFactory,
};
pub use value::{ParamKind, ParamMap, ParamValue};
