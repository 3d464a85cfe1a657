use super::value::{ParamKind, ParamValue, first_mismatch};
use crate::error::{BoxError, ServiceError, ServiceResult};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A constructed service, erased until the caller names the type it expects.
///
/// Generated providers publish `Arc<dyn Interface>` (or `Arc<Impl>`), so the
/// usual downcast target is that `Arc`.
pub struct ServiceInstance {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl ServiceInstance {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Take the concrete value out, handing the instance back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { type_name, value }),
        }
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

pub type ServiceBuild = Arc<dyn Fn(&[ParamValue]) -> Result<ServiceInstance, BoxError> + Send + Sync>;

#[derive(Clone)]
pub struct ServiceConstructor {
    signature: Vec<ParamKind>,
    build: ServiceBuild,
}

impl ServiceConstructor {
    pub fn signature(&self) -> &[ParamKind] {
        &self.signature
    }
}

/// A service published under a path, with one constructor per signature.
#[derive(Clone)]
pub struct ServiceDescriptor {
    path: String,
    type_name: String,
    constructors: Vec<ServiceConstructor>,
}

impl ServiceDescriptor {
    pub fn new(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_name: type_name.into(),
            constructors: Vec::new(),
        }
    }

    /// Add a constructor; a later constructor with the same signature replaces
    /// the earlier one.
    pub fn constructor<F>(mut self, signature: &[ParamKind], build: F) -> Self
    where
        F: Fn(&[ParamValue]) -> Result<ServiceInstance, BoxError> + Send + Sync + 'static,
    {
        self.constructors.retain(|c| c.signature != signature);
        self.constructors.push(ServiceConstructor {
            signature: signature.to_vec(),
            build: Arc::new(build),
        });
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constructors(&self) -> &[ServiceConstructor] {
        &self.constructors
    }

    pub fn instantiate(&self, signature: &[ParamKind], args: &[ParamValue]) -> ServiceResult<ServiceInstance> {
        let ctor = self
            .constructors
            .iter()
            .find(|c| c.signature == signature)
            .ok_or_else(|| ServiceError::NoConstructor {
                path: self.path.clone(),
                signature: signature.to_vec(),
            })?;

        if args.len() != signature.len() {
            return Err(ServiceError::ArgumentCount {
                path: self.path.clone(),
                expected: signature.len(),
                found: args.len(),
            });
        }
        if let Some((index, expected, found)) = first_mismatch(signature, args) {
            return Err(ServiceError::ArgumentMismatch {
                path: self.path.clone(),
                index,
                expected,
                found,
            });
        }

        (ctor.build)(args).map_err(|source| ServiceError::Construct {
            path: self.path.clone(),
            type_name: self.type_name.clone(),
            source,
        })
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signatures: Vec<&[ParamKind]> = self.constructors.iter().map(|c| c.signature()).collect();
        f.debug_struct("ServiceDescriptor")
            .field("path", &self.path)
            .field("type_name", &self.type_name)
            .field("signatures", &signatures)
            .finish()
    }
}

/// Per-module `path → service` table. Immutable once a provider hands it out.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    module: String,
    services: BTreeMap<String, ServiceDescriptor>,
}

impl ServiceRegistry {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            services: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, descriptor: ServiceDescriptor) {
        self.services.insert(descriptor.path.clone(), descriptor);
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn get(&self, path: &str) -> Option<&ServiceDescriptor> {
        self.services.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// `None` when this module does not publish `path`.
    pub fn new_service_instance(
        &self,
        path: &str,
        signature: &[ParamKind],
        args: &[ParamValue],
    ) -> Option<ServiceResult<ServiceInstance>> {
        self.services
            .get(path)
            .map(|descriptor| descriptor.instantiate(signature, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English {
        name: String,
    }

    impl Greeter for English {
        fn greet(&self) -> String {
            format!("hello {}", self.name)
        }
    }

    fn registry() -> ServiceRegistry {
        let mut registry = ServiceRegistry::new("greet");
        registry.register(
            ServiceDescriptor::new("/greet/en", "English")
                .constructor(&[], |_args| {
                    Ok(ServiceInstance::new::<Arc<dyn Greeter>>(Arc::new(English {
                        name: "world".into(),
                    })))
                })
                .constructor(&[ParamKind::Text], |args| {
                    let name = args[0].as_text().unwrap_or_default().to_string();
                    Ok(ServiceInstance::new::<Arc<dyn Greeter>>(Arc::new(English { name })))
                }),
        );
        registry
    }

    #[test]
    fn test_constructor_selected_by_signature() {
        let registry = registry();

        let default = registry
            .new_service_instance("/greet/en", &[], &[])
            .unwrap()
            .unwrap();
        let greeter = default.downcast::<Arc<dyn Greeter>>().ok().unwrap();
        assert_eq!(greeter.greet(), "hello world");

        let named = registry
            .new_service_instance("/greet/en", &[ParamKind::Text], &["ada".into()])
            .unwrap()
            .unwrap();
        let greeter = named.downcast::<Arc<dyn Greeter>>().ok().unwrap();
        assert_eq!(greeter.greet(), "hello ada");
    }

    #[test]
    fn test_unknown_path_is_absent() {
        assert!(registry().new_service_instance("/greet/fr", &[], &[]).is_none());
    }

    #[test]
    fn test_argument_checks() {
        let registry = registry();

        let err = registry
            .new_service_instance("/greet/en", &[ParamKind::Integer], &[1.into()])
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoConstructor { .. }));

        let err = registry
            .new_service_instance("/greet/en", &[ParamKind::Text], &[1.into()])
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ArgumentMismatch {
                index: 0,
                expected: ParamKind::Text,
                found: Some(ParamKind::Integer),
                ..
            }
        ));

        let err = registry
            .new_service_instance("/greet/en", &[ParamKind::Text], &[])
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ServiceError::ArgumentCount { expected: 1, found: 0, .. }));
    }

    #[test]
    fn test_wrong_downcast_returns_instance() {
        let instance = registry()
            .new_service_instance("/greet/en", &[], &[])
            .unwrap()
            .unwrap();
        let instance = instance.downcast::<String>().unwrap_err();
        assert!(instance.is::<Arc<dyn Greeter>>());
    }
}
