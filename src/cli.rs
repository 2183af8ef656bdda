//! Command-line glue: read a file, run the pipeline, print the result.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;

use crate::errors::{print_error, SourceContext};
use crate::{parser, serializer};

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(
    name = "gcl",
    version,
    about = "Parse guarded-command pseudocode and print its AST in JSON form."
)]
pub struct GclArgs {
    /// The pseudocode file to parse.
    #[arg(required = true)]
    pub file: PathBuf,
}

/// The main entry point for the CLI.
pub fn run() {
    let args = GclArgs::parse();
    if run_file(&args.file).is_err() {
        process::exit(1);
    }
}

fn run_file(path: &Path) -> Result<(), ()> {
    let source_text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path.display(), e);
            return Err(());
        }
    };

    let source = SourceContext::from_file(path.display().to_string(), source_text.clone());
    match parser::parse_program(&source_text, &source) {
        Ok(program) => {
            println!("{}", serializer::serialize_program(&program));
            Ok(())
        }
        Err(error) => {
            print_error(error);
            Err(())
        }
    }
}
