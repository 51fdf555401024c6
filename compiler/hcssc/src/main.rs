//! HCSS compiler CLI.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hcssc::{compile_file, report, CompileError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "build" => {
            if args.len() < 3 {
                eprintln!("Usage: hcssc build <file.hcss> [-o <output.css>]");
                return ExitCode::FAILURE;
            }

            let mut input = None;
            let mut output: Option<PathBuf> = None;
            let mut i = 2;
            while i < args.len() {
                if args[i] == "-o" && i + 1 < args.len() {
                    output = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else if input.is_none() {
                    input = Some(args[i].as_str());
                    i += 1;
                } else {
                    eprintln!("error: unexpected argument '{}'", args[i]);
                    return ExitCode::FAILURE;
                }
            }

            let Some(input) = input else {
                eprintln!("error: missing input file");
                return ExitCode::FAILURE;
            };
            build(Path::new(input), output.as_deref())
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: hcssc check <file.hcss>");
                return ExitCode::FAILURE;
            }
            check(Path::new(&args[2]))
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: hcssc lex <file.hcss>");
                return ExitCode::FAILURE;
            }
            lex(Path::new(&args[2]))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-v" => {
            println!("hcssc {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        command => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn build(input: &Path, output: Option<&Path>) -> ExitCode {
    let compilation = match compile_file(input) {
        Ok(c) => c,
        Err(e) => return fail(input, e),
    };
    let css = compilation.render();
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, css) {
                eprintln!("error: cannot write '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => print!("{css}"),
    }
    ExitCode::SUCCESS
}

fn check(input: &Path) -> ExitCode {
    match compile_file(input) {
        Ok(compilation) => {
            println!(
                "{}: ok ({} rules)",
                input.display(),
                compilation.rules.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(input, e),
    }
}

fn lex(input: &Path) -> ExitCode {
    let source = match std::fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {e}", input.display());
            return ExitCode::FAILURE;
        }
    };
    match hcss_lexer::lex(&source) {
        Ok(statements) => {
            for stmt in &statements {
                println!("statement {}:", stmt.index);
                for token in &stmt.tokens {
                    println!("  {:?}", token.kind);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(input, CompileError::Compile(e)),
    }
}

fn fail(input: &Path, error: CompileError) -> ExitCode {
    match error {
        CompileError::Io(e) => eprintln!("error: cannot read '{}': {e}", input.display()),
        CompileError::Compile(diagnostic) => report(&diagnostic),
    }
    ExitCode::FAILURE
}

fn print_usage() {
    println!("HCSS Compiler");
    println!();
    println!("Usage: hcssc <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file.hcss>    Compile to CSS (stdout, or -o <file>)");
    println!("  check <file.hcss>    Compile without writing output");
    println!("  lex <file.hcss>      Tokenize and display grouped statements");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Build options:");
    println!("  -o <path>            Output file");
    println!();
    println!("Examples:");
    println!("  hcssc build main.hcss");
    println!("  hcssc build main.hcss -o main.css");
    println!("  hcssc check theme.hcss");
}
