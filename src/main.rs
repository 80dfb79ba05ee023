use sorthc::{
    compiler::Compiler,
    runtime::{error::CompileError, template},
};
use std::env::var;

/// Resolve the source file path: `SORTHC_SOURCE` if set, else `scheme.4th`
/// in the current directory.
fn source_path() -> String {
    var("SORTHC_SOURCE").unwrap_or_else(|_| "scheme.4th".to_string())
}

fn run() -> Result<(), CompileError> {
    let path = source_path();
    let source = std::fs::read_to_string(&path)
        .map_err(|error| CompileError::lex(format!("cannot open {}: {}", path, error)))?;

    let output = Compiler::compile_source(&source)?;

    print!("{}", output);

    let cwd = std::env::current_dir()?;
    template::write_if_absent(&cwd)?;

    Ok(())
}

fn main() -> Result<(), CompileError> {
    run()
}
