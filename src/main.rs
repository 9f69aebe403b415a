//! Command-line entry point.
//!
//! Arguments are positional: `name=value` placeholder mappings first,
//! then template files or directories. With mappings but no paths, the
//! current directory is used, matching the common "instantiate the
//! templates next to me" invocation.

use std::process::ExitCode;

use clap::Parser;

use stencil::{Driver, FsResolver, MappingTable, SourceResolver, StencilError};

/// Instantiate pseudo-generic Rust source templates.
#[derive(Debug, Parser)]
#[command(
    name = "stencil",
    version,
    about,
    after_help = "Example:\n  stencil typeKey=u32 typeValue=String templates/map.rs"
)]
struct Cli {
    /// `name=value` placeholder mappings, then template files or directories
    #[arg(value_name = "MAPPING|PATH", required = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stencil: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StencilError> {
    // Leading arguments containing '=' are mappings; the first argument
    // without one starts the path list.
    let mut pairs = Vec::new();
    let mut rest = cli.args.as_slice();
    while let Some((first, tail)) = rest.split_first() {
        if !first.contains('=') {
            break;
        }
        pairs.push(MappingTable::parse_pair(first)?);
        rest = tail;
    }

    let mapping = MappingTable::build(&pairs)?;
    let driver = Driver::new(mapping);
    let resolver = FsResolver;

    let current_dir = [".".to_string()];
    let paths: &[String] = if rest.is_empty() { &current_dir } else { rest };

    for arg in paths {
        let files = resolver.resolve(arg)?;
        driver.process_all(&files)?;
    }
    Ok(())
}
