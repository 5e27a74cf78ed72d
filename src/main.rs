use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use loxide::{ExitCode, Interpreter};

/// loxide is a tree-walking interpreter for the Lox scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a Lox script. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|error| {
        let _ = error.print();
        process::exit(ExitCode::CompileError.code());
    });

    match args.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

fn run_file(path: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        process::exit(1);
    });

    let mut output = io::stdout();
    let mut errors = io::stderr();
    let mut interpreter = Interpreter::new(&mut output, &mut errors);

    let code = interpreter.interpret(&source);
    if code != ExitCode::Success {
        process::exit(code.code());
    }
}

/// The interactive prompt.
///
/// One interpreter lives for the whole session, so definitions persist from
/// line to line, and a line that fails to compile or run leaves the session
/// (and everything defined so far) intact.
fn run_prompt() {
    let mut output = io::stdout();
    let mut errors = io::stderr();
    let mut interpreter = Interpreter::new(&mut output, &mut errors);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        match lines.next() {
            Some(Ok(line)) => {
                interpreter.interpret(&line);
            },
            _ => break,
        }
    }
}
