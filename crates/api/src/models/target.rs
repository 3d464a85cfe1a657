use super::value::{ParamKind, ParamValue};
use crate::error::BoxError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Upcast helper so instantiated targets can be inspected by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything the router can instantiate for a path.
///
/// Implementors expose the fields that accept routed parameters through
/// [`RouteTarget::param_receivers`]; the default exposes none.
pub trait RouteTarget: AsAny + Send {
    fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
        Vec::new()
    }
}

impl dyn RouteTarget {
    pub fn downcast_ref<T: RouteTarget>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: RouteTarget>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }

    pub fn is<T: RouteTarget>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }
}

pub type TargetFactory = Arc<dyn Fn() -> Result<Box<dyn RouteTarget>, BoxError> + Send + Sync>;

/// Reference to a constructible target plus the group it was declared in.
///
/// Produced by generated route tables or by dynamic registration; construction
/// goes through the stored factory, never through introspection.
#[derive(Clone)]
pub struct TargetDescriptor {
    type_name: Cow<'static, str>,
    group: String,
    factory: TargetFactory,
}

impl TargetDescriptor {
    /// Descriptor for a target built with `Default`.
    pub fn of<T>(group: impl Into<String>) -> Self
    where
        T: RouteTarget + Default,
    {
        Self {
            type_name: Cow::Borrowed(std::any::type_name::<T>()),
            group: group.into(),
            factory: Arc::new(|| Ok(Box::new(T::default()) as Box<dyn RouteTarget>)),
        }
    }

    /// Descriptor for a target built by a fallible factory function.
    pub fn from_factory<T>(group: impl Into<String>, factory: fn() -> Result<T, BoxError>) -> Self
    where
        T: RouteTarget,
    {
        Self {
            type_name: Cow::Borrowed(std::any::type_name::<T>()),
            group: group.into(),
            factory: Arc::new(move || factory().map(|t| Box::new(t) as Box<dyn RouteTarget>)),
        }
    }

    /// Descriptor backed by an arbitrary closure.
    pub fn from_fn<F>(type_name: impl Into<Cow<'static, str>>, group: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn RouteTarget>, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            group: group.into(),
            factory: Arc::new(factory),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn construct(&self) -> Result<Box<dyn RouteTarget>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetDescriptor")
            .field("type_name", &self.type_name)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// A field that accepts a routed parameter, under its own name or an alias.
pub struct ParamReceiver<'a> {
    pub name: Cow<'static, str>,
    pub slot: ParamSlot<'a>,
}

impl<'a> ParamReceiver<'a> {
    pub fn new(name: impl Into<Cow<'static, str>>, slot: impl Into<ParamSlot<'a>>) -> Self {
        Self {
            name: name.into(),
            slot: slot.into(),
        }
    }
}

/// Typed decode target for structured parameters.
pub trait DecodeSlot {
    fn expected(&self) -> &'static str;
    fn decode(&mut self, value: &ParamValue) -> Result<(), BoxError>;
}

impl<T: DeserializeOwned> DecodeSlot for Option<T> {
    fn expected(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn decode(&mut self, value: &ParamValue) -> Result<(), BoxError> {
        *self = Some(value.decode::<T>()?);
        Ok(())
    }
}

/// Mutable view of a receiving field.
pub enum ParamSlot<'a> {
    Text(&'a mut String),
    Integer(&'a mut i64),
    Boolean(&'a mut bool),
    /// Generic receiver: takes any kind as a JSON value.
    Value(&'a mut Value),
    Decoded(&'a mut dyn DecodeSlot),
}

impl<'a> ParamSlot<'a> {
    pub fn decoded(slot: &'a mut dyn DecodeSlot) -> Self {
        ParamSlot::Decoded(slot)
    }

    /// Kind this slot requires, `None` when it accepts anything.
    pub fn expected_kind(&self) -> Option<ParamKind> {
        match self {
            ParamSlot::Text(_) => Some(ParamKind::Text),
            ParamSlot::Integer(_) => Some(ParamKind::Integer),
            ParamSlot::Boolean(_) => Some(ParamKind::Boolean),
            ParamSlot::Value(_) | ParamSlot::Decoded(_) => None,
        }
    }

    pub fn describe(&self) -> Cow<'static, str> {
        match self {
            ParamSlot::Value(_) => Cow::Borrowed("json value"),
            ParamSlot::Decoded(slot) => Cow::Borrowed(slot.expected()),
            other => match other.expected_kind() {
                Some(kind) => Cow::Borrowed(kind.as_str()),
                None => Cow::Borrowed("any"),
            },
        }
    }
}

impl<'a> From<&'a mut String> for ParamSlot<'a> {
    fn from(value: &'a mut String) -> Self {
        ParamSlot::Text(value)
    }
}

impl<'a> From<&'a mut i64> for ParamSlot<'a> {
    fn from(value: &'a mut i64) -> Self {
        ParamSlot::Integer(value)
    }
}

impl<'a> From<&'a mut bool> for ParamSlot<'a> {
    fn from(value: &'a mut bool) -> Self {
        ParamSlot::Boolean(value)
    }
}

impl<'a> From<&'a mut Value> for ParamSlot<'a> {
    fn from(value: &'a mut Value) -> Self {
        ParamSlot::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Page {
        title: String,
    }

    impl RouteTarget for Page {
        fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
            vec![ParamReceiver::new("title", &mut self.title)]
        }
    }

    #[test]
    fn test_descriptor_constructs_target() {
        let descriptor = TargetDescriptor::of::<Page>("app");
        assert_eq!(descriptor.group(), "app");
        assert!(descriptor.type_name().ends_with("Page"));

        let target = descriptor.construct().unwrap();
        assert!(target.is::<Page>());
    }

    #[test]
    fn test_factory_errors_surface() {
        fn broken() -> Result<Page, BoxError> {
            Err("no display".into())
        }

        let descriptor = TargetDescriptor::from_factory::<Page>("app", broken);
        let err = descriptor.construct().err().unwrap();
        assert_eq!(err.to_string(), "no display");
    }

    #[test]
    fn test_downcast_mut_through_trait_object() {
        let mut target: Box<dyn RouteTarget> = Box::new(Page::default());
        target.downcast_mut::<Page>().unwrap().title = "home".into();
        assert_eq!(target.downcast_ref::<Page>().unwrap().title, "home");
    }
}
