//! mango-drv - Analyzer Driver
//!
//! Boundary glue around the lexical analysis engine: reads Mango source
//! from a file or stdin, runs the analysis, prints the token listing to
//! stdout, and summarizes error-kind tokens on stderr. No scanning logic
//! lives here.

use anyhow::{Context, Result};
use mango_lex::{analyze, report_errors};
use mango_util::Handler;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for one driver invocation.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Source file to analyze; stdin when absent.
    pub input_file: Option<PathBuf>,
    /// Print usage and exit.
    pub help: bool,
    /// Print version and exit.
    pub version: bool,
}

/// Parse command line arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            config.help = true;
            return Ok(config);
        } else if arg == "--version" || arg == "-V" {
            config.version = true;
            return Ok(config);
        } else if arg.starts_with('-') {
            return Err(format!("Unknown option: {arg}"));
        } else if config.input_file.is_some() {
            return Err("expected at most one input file".to_string());
        } else {
            config.input_file = Some(PathBuf::from(arg));
        }
    }

    Ok(config)
}

/// Print help message
pub fn print_help() {
    println!("Mango Lexical Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: mangolex [OPTIONS] [input file]");
    println!();
    println!("Reads Mango source from the input file (or stdin when no file is");
    println!("given) and prints one `<lexeme> = <kind> (line L, column C)` line");
    println!("per token. Malformed and unrecognized lexemes are ordinary tokens");
    println!("in the listing; a summary of them goes to stderr.");
    println!();
    println!("Options:");
    println!("  -h, --help           Print this help message");
    println!("  -V, --version        Print version information");
    println!();
    println!("Examples:");
    println!("  mangolex program.mango      Analyze a source file");
    println!("  mangolex < program.mango    Analyze stdin");
}

/// Print version
pub fn print_version() {
    println!("mangolex {}", env!("CARGO_PKG_VERSION"));
}

/// Run one driver invocation.
///
/// The analysis itself is total; this only fails on I/O problems.
pub fn run(config: &Config) -> Result<()> {
    if config.help {
        print_help();
        return Ok(());
    }
    if config.version {
        print_version();
        return Ok(());
    }

    let source = read_source(config.input_file.as_deref())?;
    let tokens = analyze(&source);
    print!("{tokens}");

    let handler = Handler::new();
    report_errors(&tokens, &handler);
    if handler.has_errors() {
        for diag in handler.diagnostics().iter() {
            eprintln!("{diag}");
        }
        eprintln!(
            "analysis found {} malformed or unrecognized lexeme(s)",
            handler.error_count()
        );
    }

    Ok(())
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read from stdin")?;
            Ok(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args_reads_stdin() {
        let config = parse_args(&[]).unwrap();
        assert!(config.input_file.is_none());
        assert!(!config.help);
        assert!(!config.version);
    }

    #[test]
    fn test_parse_input_file() {
        let config = parse_args(&args(&["program.mango"])).unwrap();
        assert_eq!(
            config.input_file.as_deref(),
            Some(Path::new("program.mango"))
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert!(parse_args(&args(&["--help"])).unwrap().help);
        assert!(parse_args(&args(&["-h"])).unwrap().help);
        assert!(parse_args(&args(&["--version"])).unwrap().version);
        assert!(parse_args(&args(&["-V"])).unwrap().version);
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_parse_rejects_second_input_file() {
        assert!(parse_args(&args(&["a.mango", "b.mango"])).is_err());
    }
}
