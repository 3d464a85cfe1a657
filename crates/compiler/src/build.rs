//! Helper for `build.rs` scripts.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let out_dir = std::env::var("OUT_DIR").unwrap();
//!     xrouter_compiler::build::generate("routes", out_dir).unwrap();
//! }
//!
//! // lib.rs
//! include!(concat!(env!("OUT_DIR"), "/xrouter_providers.rs"));
//! ```

use crate::compiler::{CompileOutput, RegistryCompiler};
use crate::config::CompilerConfig;
use crate::error::{CompileError, Result};
use crate::scanner::ManifestScanner;
use std::path::Path;

/// Compile every manifest under `manifest_dir` into `out_dir` with the
/// default configuration.
pub fn generate(manifest_dir: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<CompileOutput> {
    generate_with(manifest_dir, CompilerConfig::default().with_output_dir(out_dir.as_ref()))
}

/// Like [`generate`], writing to `config.output_dir`.
///
/// Prints `cargo:rerun-if-changed` for the manifest tree and every manifest,
/// forwards warnings as `cargo:warning`, and fails on error diagnostics.
pub fn generate_with(manifest_dir: impl AsRef<Path>, config: CompilerConfig) -> Result<CompileOutput> {
    let manifest_dir = manifest_dir.as_ref();
    println!("cargo:rerun-if-changed={}", manifest_dir.display());

    let scan = ManifestScanner::new(manifest_dir).scan()?;
    for unit in &scan.units {
        println!("cargo:rerun-if-changed={}", unit.source.display());
    }
    for failure in &scan.failures {
        println!("cargo:rerun-if-changed={}", failure.source.display());
    }

    let compiler = RegistryCompiler::new(config);
    let output = compiler.compile_scan(scan);
    for diagnostic in &output.report.diagnostics {
        // cargo only has a warning channel; errors fail the build below
        println!("cargo:warning={}", diagnostic.to_string().replace('\n', " "));
    }

    let errors = output.report.error_count();
    if errors > 0 {
        return Err(CompileError::Diagnostics(errors));
    }

    output.write_outputs(&compiler.config().output_dir)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_outputs() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            src.path().join("xrouter.json"),
            r#"{"module": "order", "routes": [{"path": "/order/detail", "target": "crate::OrderDetail"}]}"#,
        )
        .unwrap();

        let output = generate(src.path(), out.path()).unwrap();

        assert_eq!(output.report.providers, vec!["order$RouteTable_order"]);
        assert!(out.path().join("order_router.rs").exists());
        assert!(out.path().join("xrouter_providers.rs").exists());
    }

    #[test]
    fn test_generate_fails_on_errors_without_writing() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            src.path().join("xrouter.json"),
            r#"{"module": "order", "routes": [{"path": "", "target": "crate::OrderDetail"}]}"#,
        )
        .unwrap();

        let err = generate(src.path(), out.path()).unwrap_err();

        assert!(matches!(err, CompileError::Diagnostics(1)));
        assert!(!out.path().join("xrouter_providers.rs").exists());
    }
}
