mod repl;

use crate::repl::{OutputMode, Repl};
use clap::Parser;
use log::debug;
use shifu::Interpreter;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "shifu", version, about = "Shifu programming language")]
struct Cli {
    /// Stage to print: lexer, parser or lang
    #[arg(long, default_value = "lang", value_parser = OutputMode::from_str)]
    output: OutputMode,
    /// Script to run as a single program instead of starting the REPL
    script: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Output mode: {}", cli.output);
    let code = match cli.script {
        Some(path) => run_file(&path, cli.output),
        None => run_prompt(cli.output),
    };
    process::exit(code);
}

fn run_file(path: &Path, mode: OutputMode) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("could not read {}: {}", path.display(), e);
            return 74;
        }
    };
    let mut interpreter = Interpreter::new();
    match repl::render(mode, &source, &mut interpreter) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            65
        }
    }
}

fn run_prompt(mode: OutputMode) -> i32 {
    let result = Repl::new(mode).and_then(|mut repl| repl.run());
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
