//! Declaration manifests: the build-visible form of path and service
//! declarations for one compilation unit.

use crate::error::{CompileError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xrouter_api::ParamKind;

/// One manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleManifest {
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub routes: Vec<RouteDeclaration>,
    #[serde(default)]
    pub services: Vec<ServiceDeclaration>,
}

/// `{path, group}` attached to a target type or a factory function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDeclaration {
    #[serde(default)]
    pub path: String,
    /// Empty or absent means the module-default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Rust type path of a `RouteTarget`.
    #[serde(default)]
    pub target: String,
    /// `fn() -> Result<Target, BoxError>`; `Default` is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
}

/// `{path}` attached to a service implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDeclaration {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub target: String,
    /// Published type, e.g. `dyn crate::OrderService`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<ConstructorDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorDeclaration {
    #[serde(default)]
    pub signature: Vec<ParamKind>,
    /// `fn(&[ParamValue]) -> Result<Target, BoxError>`; only the empty
    /// signature may omit it (`Default` is used).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl ModuleManifest {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| CompileError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A manifest together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestUnit {
    pub source: PathBuf,
    pub manifest: ModuleManifest,
}

impl ManifestUnit {
    pub fn new(source: impl Into<PathBuf>, manifest: ModuleManifest) -> Self {
        Self {
            source: source.into(),
            manifest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ModuleManifest::from_json_str(
            r#"{
                "module": "order",
                "routes": [
                    {"path": "/order/detail", "target": "crate::OrderDetail"},
                    {"path": "/pay/home", "group": "pay", "target": "crate::PayHome", "factory": "crate::PayHome::create"}
                ],
                "services": [
                    {
                        "path": "/order/order",
                        "target": "crate::OrderServiceImpl",
                        "interface": "dyn crate::OrderService",
                        "constructors": [
                            {"signature": []},
                            {"signature": ["text"], "function": "crate::OrderServiceImpl::with_name"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.module, "order");
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[1].group.as_deref(), Some("pay"));
        assert_eq!(manifest.services[0].constructors[1].signature, vec![ParamKind::Text]);
    }

    #[test]
    fn test_missing_path_parses_as_empty() {
        let manifest =
            ModuleManifest::from_json_str(r#"{"module": "m", "routes": [{"target": "crate::A"}]}"#)
                .unwrap();
        assert!(manifest.routes[0].path.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = ModuleManifest::from_json_str(r#"{"module": "m", "extra": 1}"#);
        assert!(err.is_err());
    }
}
