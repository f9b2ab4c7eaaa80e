use handy_lang::handy_frontend::tokenize;
use handy_lang::treewalk_interpreter::{Environment, Interpreter};
use handy_lang::{parse_source, run_source, HandyError};
#[cfg(feature = "trace-tokens")]
use handy_lang::tokenize_source;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, io};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// handy runs and inspects scripts written in the Handy language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tokenize, parse and evaluate a script.
    Run { file: PathBuf },

    /// Print the syntax tree of a script.
    Ast { file: PathBuf },

    /// Count the tokens of a file, or of every matching file under a directory.
    Tokens {
        path: PathBuf,

        /// File extension to look for when walking a directory.
        #[arg(long, default_value = "hdy")]
        ext: String,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so script output on stdout stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Run { file } => run_file(file),
        Command::Ast { file } => print_ast(file),
        Command::Tokens { path, ext } => count_tokens(path, ext),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn read_script(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn run_file(path: &Path) -> anyhow::Result<ExitCode> {
    let source = read_script(path)?;
    let filename = path.display().to_string();

    #[cfg(feature = "trace-tokens")]
    for token in tokenize_source(&source)? {
        eprintln!("{:>4}:{:<3} {}", token.line, token.column, token);
    }

    let mut interpreter = Interpreter::new(Environment::new());
    run_source(&mut interpreter, &source, &filename)?;
    Ok(ExitCode::SUCCESS)
}

fn print_ast(path: &Path) -> anyhow::Result<ExitCode> {
    let source = read_script(path)?;
    let program = parse_source(&source, &path.display().to_string())?;
    print!("{}", program);
    Ok(ExitCode::SUCCESS)
}

fn count_tokens(path: &Path, ext: &str) -> anyhow::Result<ExitCode> {
    let files = if path.is_dir() {
        let mut files = vec![];
        collect_files(path, ext, &mut files)?;
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut all_ok = true;
    for file in files.iter() {
        let source = read_script(file)?;
        match tokenize(&source) {
            Ok(tokens) => println!("{}: {} tokens", file.display(), tokens.len()),
            Err(e) => {
                all_ok = false;
                eprintln!("{}: Syntax Error: {}", file.display(), e);
            }
        }
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn collect_files(dir: &Path, ext: &str, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list '{}'", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, ext, files)?;
        } else if path.extension().map_or(false, |e| e == ext) {
            files.push(path);
        }
    }
    Ok(())
}

fn report_error(error: &anyhow::Error) {
    eprintln!("{}", describe_error(error));
}

fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<HandyError>() {
        Some(HandyError::Lexical(e)) => format!("Syntax Error: {}", e),
        Some(HandyError::Syntax(e)) => format!("Syntax Error: {}", e),
        Some(HandyError::Runtime(e)) => format!("Runtime Error: {}", e),
        None => format!("Unexpected Error: {:#}", error),
    }
}
