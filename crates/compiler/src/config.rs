use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Knobs of the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Path under which generated code reaches the api crate.
    pub api_crate: String,
    /// Where generated files are written.
    pub output_dir: PathBuf,
    /// File name of the aggregate that includes every generated module.
    pub aggregate_file: String,
    /// Suffix appended to the module name for per-module files.
    pub module_file_suffix: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            api_crate: "::xrouter_api".to_string(),
            output_dir: PathBuf::from("."),
            aggregate_file: "xrouter_providers.rs".to_string(),
            module_file_suffix: "_router.rs".to_string(),
        }
    }
}

impl CompilerConfig {
    pub fn with_api_crate(mut self, api_crate: impl Into<String>) -> Self {
        self.api_crate = api_crate.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// `<snake_module><suffix>`; the stem doubles as the aggregate's `mod` name.
    pub fn module_file_name(&self, module: &str) -> String {
        format!("{}{}", module.to_snake_case(), self.module_file_suffix)
    }

    pub fn module_mod_name(&self, module: &str) -> String {
        let file = self.module_file_name(module);
        file.strip_suffix(".rs").unwrap_or(&file).to_string()
    }
}
