//! Manifest scanner.
//!
//! Walks a source tree and collects every declaration manifest
//! (`xrouter.json` or `*.xrouter.json`). Traversal is sorted by file name so
//! the resulting units, and everything generated from them, do not depend on
//! directory iteration order.

use crate::diagnostics::{Diagnostic, Severity};
use crate::error::{CompileError, Result};
use crate::manifest::{ManifestUnit, ModuleManifest};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

pub const MANIFEST_FILE: &str = "xrouter.json";
pub const MANIFEST_SUFFIX: &str = ".xrouter.json";

pub struct ManifestScanner {
    root: PathBuf,
    skip_dirs: Vec<String>,
}

impl ManifestScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_dirs: vec!["target".to_string()],
        }
    }

    /// Skip directories with this name (hidden directories are always skipped).
    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skip_dirs.push(name.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_manifest(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name == MANIFEST_FILE || name.ends_with(MANIFEST_SUFFIX))
    }

    /// Collect and parse every manifest under the root.
    ///
    /// A manifest that fails to parse becomes an error diagnostic in
    /// [`ScanResult::failures`]; the rest of the tree is still scanned.
    pub fn scan(&self) -> Result<ScanResult> {
        let start = Instant::now();
        let mut result = ScanResult::default();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|source| CompileError::Walk {
                path: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() || !Self::is_manifest(entry.path()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            match ModuleManifest::from_path(&path) {
                Ok(manifest) => {
                    debug!(
                        "Loaded manifest {:?} (module {:?}, {} routes, {} services)",
                        path,
                        manifest.module,
                        manifest.routes.len(),
                        manifest.services.len()
                    );
                    result.units.push(ManifestUnit::new(path, manifest));
                }
                Err(e) => result.failures.push(Diagnostic {
                    severity: Severity::Error,
                    source: path,
                    module: String::new(),
                    group: None,
                    subject: String::new(),
                    message: e.to_string(),
                }),
            }
        }

        result.duration = start.elapsed();
        info!(
            "Manifest scan of {:?} complete: {} manifests, {} failed in {:?}",
            self.root,
            result.units.len(),
            result.failures.len(),
            result.duration
        );

        Ok(result)
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_str().unwrap_or("");
        name.starts_with('.') || self.skip_dirs.iter().any(|skip| skip == name)
    }
}

/// Result of a manifest scan
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    /// Parsed manifests, in sorted path order
    pub units: Vec<ManifestUnit>,
    /// Manifests that could not be read or parsed
    pub failures: Vec<Diagnostic>,
    /// Time taken for the scan
    pub duration: Duration,
}
