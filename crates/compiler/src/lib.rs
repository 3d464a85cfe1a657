//! Build-time registry compiler.
//!
//! Turns scattered route and service declarations (JSON manifests) into
//! generated Rust providers, one file per module, named after the convention
//! in [`xrouter_api::naming`] so that runtime discovery can find them.
//!
//! ```text
//! manifests ──▶ ManifestScanner ──▶ RegistryCompiler ──▶ codegen ──▶ <module>_router.rs
//!                                       │                              xrouter_providers.rs
//!                                       └──▶ CompileReport (diagnostics)
//! ```

pub mod build;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod manifest;
pub mod model;
pub mod scanner;

pub use compiler::{CompileOutput, FileState, GeneratedFile, RegistryCompiler, WriteStatus};
pub use config::CompilerConfig;
pub use diagnostics::{CompileReport, Diagnostic, Severity};
pub use error::{CompileError, Result};
pub use manifest::{
    ConstructorDeclaration, ManifestUnit, ModuleManifest, RouteDeclaration, ServiceDeclaration,
};
pub use model::{CompiledConstructor, CompiledModule, CompiledRoute, CompiledService};
pub use scanner::{ManifestScanner, ScanResult};
