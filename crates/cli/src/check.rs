use crate::{GenerateArgs, print_diagnostics};
use tracing::info;
use xrouter_compiler::{CompileError, FileState, RegistryCompiler};

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let compiler = RegistryCompiler::new(args.compiler_config()?);
    let output = compiler.compile_dir(&args.path)?;
    print_diagnostics(&output.report);

    let errors = output.report.error_count();
    if errors > 0 {
        return Err(CompileError::Diagnostics(errors).into());
    }

    let mut outdated = 0;
    for (path, state) in output.check_outputs(&compiler.config().output_dir)? {
        match state {
            FileState::UpToDate => {}
            FileState::Stale => {
                outdated += 1;
                println!("stale   {}", path.display());
            }
            FileState::Missing => {
                outdated += 1;
                println!("missing {}", path.display());
            }
        }
    }

    if outdated > 0 {
        return Err(CompileError::Stale(outdated).into());
    }
    info!("Generated sources in {} are up to date", compiler.config().output_dir.display());
    Ok(())
}
