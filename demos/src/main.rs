// ABOUTME: Thin CLI exercising the sandrule embedding API — compile and run a script

use clap::Parser;
use sandrule::{HostBindings, Interpreter, Value};
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a sandrule script and print its result.
#[derive(Parser, Debug)]
#[command(name = "sandrule-demo")]
#[command(about = "Compiles and runs a sandrule script against a fresh interpreter")]
struct CliArgs {
    /// Script file to execute.
    script: PathBuf,

    /// Maximum number of evaluator operations before aborting.
    #[arg(long = "max-ops", value_name = "N")]
    max_ops: Option<u64>,

    /// Bind an integer variable for the script, e.g. `--bind threshold=42`.
    #[arg(long = "bind", value_name = "NAME=INT", action = clap::ArgAction::Append)]
    bindings: Vec<String>,
}

fn parse_binding(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("--bind expects NAME=INT, got {raw:?}"))?;
    let parsed: i64 = value
        .parse()
        .map_err(|_| format!("--bind value must be an integer, got {value:?}"))?;
    Ok((name.to_string(), Value::Int(parsed)))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = CliArgs::parse();

    let source = match std::fs::read_to_string(&args.script) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to read {}: {e}", args.script.display());
            return ExitCode::FAILURE;
        }
    };

    let mut host_bindings = HostBindings::new();
    for raw in &args.bindings {
        match parse_binding(raw) {
            Ok((name, value)) => host_bindings = host_bindings.bind(name, value),
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        }
    }

    let interpreter = Interpreter::new();
    match interpreter.run(&source, host_bindings, args.max_ops) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
