//! Validation, grouping and output handling of the registry compiler.

use crate::codegen;
use crate::config::CompilerConfig;
use crate::diagnostics::{CompileReport, Diagnostic, Severity};
use crate::error::{CompileError, Result};
use crate::manifest::{ManifestUnit, RouteDeclaration, ServiceDeclaration};
use crate::model::{CompiledConstructor, CompiledModule, CompiledRoute, CompiledService};
use crate::scanner::{ManifestScanner, ScanResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xrouter_api::naming::{is_valid_segment, route_table_name, service_provider_name};

/// A rendered output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    UpToDate,
    Stale,
    Missing,
}

/// Everything one compile run produced.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    pub modules: Vec<CompiledModule>,
    /// Per-module files in module order, then the aggregate.
    pub files: Vec<GeneratedFile>,
    pub report: CompileReport,
}

impl CompileOutput {
    pub fn file(&self, file_name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }

    pub fn module(&self, module: &str) -> Option<&CompiledModule> {
        self.modules.iter().find(|m| m.module == module)
    }

    /// Write every generated file, skipping files whose bytes are unchanged.
    pub fn write_outputs(&self, out_dir: &Path) -> Result<Vec<(PathBuf, WriteStatus)>> {
        fs::create_dir_all(out_dir).map_err(|source| CompileError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut statuses = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = out_dir.join(&file.file_name);
            let status = if read_existing(&path)?.as_deref() == Some(file.contents.as_bytes()) {
                WriteStatus::Unchanged
            } else {
                fs::write(&path, &file.contents).map_err(|source| CompileError::Io {
                    path: path.clone(),
                    source,
                })?;
                WriteStatus::Written
            };
            debug!("{:?}: {:?}", path, status);
            statuses.push((path, status));
        }
        Ok(statuses)
    }

    /// Compare generated files with what is on disk, without writing.
    pub fn check_outputs(&self, out_dir: &Path) -> Result<Vec<(PathBuf, FileState)>> {
        self.files
            .iter()
            .map(|file| -> Result<(PathBuf, FileState)> {
                let path = out_dir.join(&file.file_name);
                let state = match read_existing(&path)? {
                    None => FileState::Missing,
                    Some(bytes) if bytes == file.contents.as_bytes() => FileState::UpToDate,
                    Some(_) => FileState::Stale,
                };
                Ok((path, state))
            })
            .collect()
    }
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CompileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Characters that would let a declared type path escape its position in
/// generated code.
const FORBIDDEN_IN_PATHS: &[char] = &[';', '{', '}', '"', '\n', '\r'];

fn is_code_path(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains(FORBIDDEN_IN_PATHS)
}

/// Turns manifests into compiled modules and generated sources.
pub struct RegistryCompiler {
    config: CompilerConfig,
}

impl RegistryCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Scan `root` and compile everything found.
    pub fn compile_dir(&self, root: &Path) -> Result<CompileOutput> {
        let scan = ManifestScanner::new(root).scan()?;
        Ok(self.compile_scan(scan))
    }

    /// Compile a scan result; manifests that failed to parse are carried
    /// into the report as errors.
    pub fn compile_scan(&self, scan: ScanResult) -> CompileOutput {
        let mut report = CompileReport::default();
        for failure in scan.failures {
            report.push(failure);
        }
        self.compile_with_report(&scan.units, report)
    }

    pub fn compile(&self, units: &[ManifestUnit]) -> CompileOutput {
        self.compile_with_report(units, CompileReport::default())
    }

    fn compile_with_report(&self, units: &[ManifestUnit], mut report: CompileReport) -> CompileOutput {
        let mut modules: BTreeMap<String, ModuleBuilder> = BTreeMap::new();

        for unit in units {
            let module = unit.manifest.module.as_str();
            if !is_valid_segment(module) {
                abort_unit(unit, &mut report);
                continue;
            }
            let builder = modules
                .entry(module.to_string())
                .or_insert_with(|| ModuleBuilder::new(module));
            for route in &unit.manifest.routes {
                builder.add_route(&unit.source, route, &mut report);
            }
            for service in &unit.manifest.services {
                builder.add_service(&unit.source, service, &mut report);
            }
        }

        let mut compiled: Vec<CompiledModule> = Vec::with_capacity(modules.len());
        let mut file_owners: BTreeMap<String, String> = BTreeMap::new();
        for (name, builder) in modules {
            let file_name = self.config.module_file_name(&name);
            if let Some(owner) = file_owners.get(&file_name) {
                report.push(Diagnostic {
                    severity: Severity::Error,
                    source: builder.first_source.clone(),
                    module: name.clone(),
                    group: None,
                    subject: file_name.clone(),
                    message: format!("generated file name collides with module `{owner}`"),
                });
                report.aborted_groups.extend(builder.module.table_names());
                report
                    .aborted_groups
                    .extend(builder.module.service_provider_name());
                continue;
            }
            file_owners.insert(file_name, name);
            compiled.push(builder.finish());
        }

        check_cross_module_services(&compiled, &mut report);

        let mut files = Vec::with_capacity(compiled.len() + 1);
        let mut aggregate_entries = Vec::with_capacity(compiled.len());
        for module in &compiled {
            report.providers.extend(module.table_names());
            report.providers.extend(module.service_provider_name());

            let file_name = self.config.module_file_name(&module.module);
            aggregate_entries.push((self.config.module_mod_name(&module.module), file_name.clone()));
            files.push(GeneratedFile {
                file_name,
                contents: codegen::render_module(module, &self.config),
            });
        }
        files.push(GeneratedFile {
            file_name: self.config.aggregate_file.clone(),
            contents: codegen::render_aggregate(&aggregate_entries, &self.config),
        });
        report.providers.sort();
        report.aborted_groups.sort();
        report.aborted_groups.dedup();

        info!(
            "Compiled {} module(s) into {} provider(s): {} error(s), {} warning(s)",
            compiled.len(),
            report.providers.len(),
            report.error_count(),
            report.warnings().count()
        );

        CompileOutput {
            modules: compiled,
            files,
            report,
        }
    }
}

impl Default for RegistryCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

/// The module name cannot be turned into provider names: nothing from this
/// manifest is generated.
fn abort_unit(unit: &ManifestUnit, report: &mut CompileReport) {
    let module = &unit.manifest.module;
    let message = if module.is_empty() {
        "missing module name".to_string()
    } else {
        "module name must be an identifier ([A-Za-z_][A-Za-z0-9_]*)".to_string()
    };
    report.push(Diagnostic {
        severity: Severity::Error,
        source: unit.source.clone(),
        module: module.clone(),
        group: None,
        subject: module.clone(),
        message,
    });

    let groups: BTreeSet<&str> = unit
        .manifest
        .routes
        .iter()
        .map(|r| r.group.as_deref().filter(|g| !g.is_empty()).unwrap_or(module))
        .collect();
    report
        .aborted_groups
        .extend(groups.into_iter().map(|group| route_table_name(module, group)));
    if !unit.manifest.services.is_empty() {
        report.aborted_groups.push(service_provider_name(module));
    }
}

fn check_cross_module_services(modules: &[CompiledModule], report: &mut CompileReport) {
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for module in modules {
        for service in module.services.values() {
            match owners.get(service.path.as_str()) {
                Some(owner) => report.push(Diagnostic {
                    severity: Severity::Warning,
                    source: service.source.clone(),
                    module: module.module.clone(),
                    group: None,
                    subject: service.path.clone(),
                    message: format!(
                        "service path is also published by module `{owner}`; the first registered module wins at run time"
                    ),
                }),
                None => {
                    owners.insert(&service.path, &module.module);
                }
            }
        }
    }
}

struct ModuleBuilder {
    module: CompiledModule,
    first_source: PathBuf,
    bad_groups: BTreeSet<String>,
    idents: BTreeMap<String, String>,
}

impl ModuleBuilder {
    fn new(module: &str) -> Self {
        Self {
            module: CompiledModule::new(module),
            first_source: PathBuf::new(),
            bad_groups: BTreeSet::new(),
            idents: BTreeMap::new(),
        }
    }

    fn diagnostic(
        &self,
        severity: Severity,
        source: &Path,
        group: Option<&str>,
        subject: &str,
        message: impl Into<String>,
    ) -> Diagnostic {
        Diagnostic {
            severity,
            source: source.to_path_buf(),
            module: self.module.module.clone(),
            group: group.map(str::to_string),
            subject: subject.to_string(),
            message: message.into(),
        }
    }

    fn note_source(&mut self, source: &Path) {
        if self.first_source.as_os_str().is_empty() {
            self.first_source = source.to_path_buf();
        }
    }

    fn add_route(&mut self, source: &Path, decl: &RouteDeclaration, report: &mut CompileReport) {
        self.note_source(source);
        let group = decl
            .group
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(&self.module.module)
            .to_string();

        if self.bad_groups.contains(&group) {
            return;
        }
        if !is_valid_segment(&group) {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                Some(&group),
                &group,
                "group name must be an identifier ([A-Za-z_][A-Za-z0-9_]*); group not generated",
            ));
            self.abort_group(group, report);
            return;
        }
        if !self.module.groups.contains_key(&group) {
            let ident = codegen::table_ident(&self.module.module, &group);
            if let Some(other) = self.idents.get(&ident) {
                report.push(self.diagnostic(
                    Severity::Error,
                    source,
                    Some(&group),
                    &group,
                    format!("generated type `{ident}` collides with group `{other}`; group not generated"),
                ));
                self.abort_group(group, report);
                return;
            }
        }

        if decl.path.is_empty() {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                Some(&group),
                &decl.target,
                "route declaration has an empty path",
            ));
            return;
        }
        if !is_code_path(&decl.target) {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                Some(&group),
                &decl.path,
                format!("invalid target type `{}`", decl.target),
            ));
            return;
        }
        if let Some(factory) = decl.factory.as_deref().filter(|f| !is_code_path(f)) {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                Some(&group),
                &decl.path,
                format!("invalid factory `{factory}`"),
            ));
            return;
        }

        let ident = codegen::table_ident(&self.module.module, &group);
        let routes = self.module.groups.entry(group.clone()).or_default();
        if let Some(first) = routes.get(&decl.path) {
            let message = format!(
                "duplicate path in group; keeping `{}` from {}",
                first.target,
                first.source.display()
            );
            report.push(self.diagnostic(Severity::Warning, source, Some(&group), &decl.path, message));
            return;
        }
        routes.insert(
            decl.path.clone(),
            CompiledRoute {
                path: decl.path.clone(),
                target: decl.target.trim().to_string(),
                factory: decl.factory.as_deref().map(|f| f.trim().to_string()),
                source: source.to_path_buf(),
            },
        );
        self.idents.entry(ident).or_insert(group);
    }

    fn abort_group(&mut self, group: String, report: &mut CompileReport) {
        report
            .aborted_groups
            .push(route_table_name(&self.module.module, &group));
        self.module.groups.remove(&group);
        self.bad_groups.insert(group);
    }

    fn add_service(&mut self, source: &Path, decl: &ServiceDeclaration, report: &mut CompileReport) {
        self.note_source(source);

        if decl.path.is_empty() {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                None,
                &decl.target,
                "service declaration has an empty path",
            ));
            return;
        }
        if !is_code_path(&decl.target) {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                None,
                &decl.path,
                format!("invalid service type `{}`", decl.target),
            ));
            return;
        }
        if let Some(interface) = decl.interface.as_deref().filter(|i| !is_code_path(i)) {
            report.push(self.diagnostic(
                Severity::Error,
                source,
                None,
                &decl.path,
                format!("invalid interface `{interface}`"),
            ));
            return;
        }

        let mut constructors: Vec<CompiledConstructor> = Vec::new();
        for ctor in &decl.constructors {
            let function = ctor.function.as_deref().map(str::trim).filter(|f| !f.is_empty());
            match function {
                None if !ctor.signature.is_empty() => {
                    report.push(self.diagnostic(
                        Severity::Error,
                        source,
                        None,
                        &decl.path,
                        "constructor with arguments needs a `function`; service not generated",
                    ));
                    return;
                }
                Some(f) if !is_code_path(f) => {
                    report.push(self.diagnostic(
                        Severity::Error,
                        source,
                        None,
                        &decl.path,
                        format!("invalid constructor function `{f}`; service not generated"),
                    ));
                    return;
                }
                _ => {}
            }
            if constructors.iter().any(|c| c.signature == ctor.signature) {
                report.push(self.diagnostic(
                    Severity::Warning,
                    source,
                    None,
                    &decl.path,
                    "duplicate constructor signature; keeping the first",
                ));
                continue;
            }
            constructors.push(CompiledConstructor {
                signature: ctor.signature.clone(),
                function: function.map(str::to_string),
            });
        }
        if constructors.is_empty() {
            constructors.push(CompiledConstructor {
                signature: Vec::new(),
                function: None,
            });
        }

        if let Some(first) = self.module.services.get(&decl.path) {
            let message = format!(
                "duplicate service path in module; keeping `{}` from {}",
                first.target,
                first.source.display()
            );
            report.push(self.diagnostic(Severity::Warning, source, None, &decl.path, message));
            return;
        }
        self.module.services.insert(
            decl.path.clone(),
            CompiledService {
                path: decl.path.clone(),
                target: decl.target.trim().to_string(),
                interface: decl.interface.as_deref().map(|i| i.trim().to_string()),
                constructors,
                source: source.to_path_buf(),
            },
        );
    }

    fn finish(self) -> CompiledModule {
        self.module
    }
}
