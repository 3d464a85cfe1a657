//! Parameter marshalling (transport forms) and injection (receiver fields).

pub mod codec;
pub mod injector;
pub mod marshaller;

pub use codec::JsonCodec;
pub use injector::{InjectionReport, ParameterInjector};
pub use marshaller::Marshaller;
