//! varcheck command line driver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use varcheck::feedback::AnalysisFeedback;
use varcheck::frontend::lexer::LexicalAnalyzer;
use varcheck::analyze_source;

/// varcheck - lexical, syntax and semantic checker
#[derive(Parser, Debug)]
#[command(name = "varcheck")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Checks variable declarations and assignments, one statement per line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a JSON feedback report instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log per-line progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run all three stages on a source file
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print the token categories of every line
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match &cli.command {
        Some(Commands::Check { input }) => check_file(input, cli.json),
        Some(Commands::Tokens { input }) => print_tokens(input),
        Some(Commands::Version) => {
            println!("varcheck 0.1.0");
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => match cli.input {
            Some(ref input) => check_file(input, cli.json),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: varcheck <FILE> or varcheck check <FILE>");
                process::exit(2);
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Run all stages; returns whether the file is free of diagnostics
fn check_file(input: &Path, json: bool) -> Result<bool> {
    let source = read_source(input)?;
    log::info!("checking {}", input.display());

    let report = analyze_source(&source);

    if json {
        let feedback = AnalysisFeedback::from_report(&report, &input.to_string_lossy());
        println!("{}", feedback.to_json());
    } else {
        println!("Checking: {}", input.display());
        println!();
        print!("{}", report.render_text());
        println!();
        if report.is_clean() {
            println!("No errors found");
        } else {
            println!("{} error(s) found", report.diagnostic_count());
        }
    }

    Ok(report.is_clean())
}

/// Print the token dump; returns whether every lexeme was recognized
fn print_tokens(input: &Path) -> Result<bool> {
    let source = read_source(input)?;
    let report = LexicalAnalyzer::analyze(&source);
    print!("{}", report.token_dump());
    if !report.is_success() {
        eprint!("{}", report.error_report());
    }
    Ok(report.is_success())
}
