use crate::{GenerateArgs, print_diagnostics};
use tracing::info;
use xrouter_compiler::{CompileError, RegistryCompiler, WriteStatus};

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let compiler = RegistryCompiler::new(args.compiler_config()?);

    info!("Compiling manifests under {}...", args.path.display());
    let output = compiler.compile_dir(&args.path)?;
    print_diagnostics(&output.report);

    let errors = output.report.error_count();
    if errors > 0 {
        return Err(CompileError::Diagnostics(errors).into());
    }

    let statuses = output.write_outputs(&compiler.config().output_dir)?;
    let written = statuses
        .iter()
        .filter(|(_, status)| *status == WriteStatus::Written)
        .count();
    for (path, status) in &statuses {
        if *status == WriteStatus::Written {
            println!("wrote {}", path.display());
        }
    }

    info!(
        "Generated {} provider(s) for {} module(s); {} file(s) written, {} unchanged",
        output.report.providers.len(),
        output.modules.len(),
        written,
        statuses.len() - written
    );
    Ok(())
}
