mod check;
mod compile;
mod inspect;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use xrouter_compiler::{CompileReport, CompilerConfig};

#[derive(Parser)]
#[command(
    name = "xrouter",
    version,
    about = "Build-time registry compiler for declarative routes and services",
    long_about = "xrouter turns route and service declarations scattered over feature modules \
                  (xrouter.json manifests) into generated provider tables that the runtime router \
                  discovers lazily, group by group."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate provider sources from manifests
    #[command(
        long_about = "Scans MANIFEST_DIR for xrouter.json / *.xrouter.json manifests, validates them \
                            and writes one <module>_router.rs per module plus the aggregate \
                            xrouter_providers.rs. Unchanged files are left untouched."
    )]
    Compile(GenerateArgs),
    /// Verify that generated sources are up to date
    #[command(
        long_about = "Compiles the manifests in memory and compares the result with the files in \
                            the output directory. Nothing is written; exits non-zero when a file is \
                            missing or stale."
    )]
    Check(GenerateArgs),
    /// Show the routes and services declared under a directory
    Inspect {
        /// Directory containing the manifests
        #[arg(value_name = "MANIFEST_DIR")]
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory containing the manifests
    #[arg(value_name = "MANIFEST_DIR")]
    pub path: PathBuf,
    /// Directory receiving the generated sources
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,
    /// Path under which generated code reaches the api crate (e.g. ::xrouter)
    #[arg(long, value_name = "PATH")]
    pub api_crate: Option<String>,
    /// JSON compiler configuration; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Configuration file (if any) overridden by the command line.
    pub fn compiler_config(&self) -> Result<CompilerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(file) => load_config(file)?,
            None => CompilerConfig::default(),
        };
        if let Some(api_crate) = &self.api_crate {
            config.api_crate = api_crate.clone();
        }
        config.output_dir = self.out.clone();
        Ok(config)
    }
}

fn load_config(file: &Path) -> Result<CompilerConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read config {}: {e}", file.display()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Print every finding, errors last so they stay visible.
fn print_diagnostics(report: &CompileReport) {
    for diagnostic in report.warnings().chain(report.errors()) {
        eprintln!("{diagnostic}");
    }
}

pub fn execute(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Compile(args) => compile::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::Inspect { path } => inspect::run(&path),
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = xrouter::init_logging("cli");
    execute(cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compile() {
        let cli = Cli::try_parse_from([
            "xrouter",
            "compile",
            "routes",
            "--out",
            "gen",
            "--api-crate",
            "::xrouter",
        ])
        .unwrap();
        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.path, PathBuf::from("routes"));
                let config = args.compiler_config().unwrap();
                assert_eq!(config.api_crate, "::xrouter");
                assert_eq!(config.output_dir, PathBuf::from("gen"));
                assert_eq!(config.aggregate_file, "xrouter_providers.rs");
            }
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn test_out_is_required() {
        assert!(Cli::try_parse_from(["xrouter", "check", "routes"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("xrouter.config.json");
        std::fs::write(
            &file,
            r#"{"api_crate": "::app_api", "aggregate_file": "providers.rs"}"#,
        )
        .unwrap();

        let args = GenerateArgs {
            path: PathBuf::from("routes"),
            out: PathBuf::from("gen"),
            api_crate: None,
            config: Some(file.clone()),
        };
        let config = args.compiler_config().unwrap();
        assert_eq!(config.api_crate, "::app_api");
        assert_eq!(config.aggregate_file, "providers.rs");

        let args = GenerateArgs {
            api_crate: Some("::xrouter".into()),
            ..args
        };
        assert_eq!(args.compiler_config().unwrap().api_crate, "::xrouter");
    }
}
