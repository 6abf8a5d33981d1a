use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lexan::{
    display_error,
    lexer::lexer::lex,
    load_source,
    report::report::{print_cleaned, render, summarize},
};

/// Tokenize a C-like source file and summarize its vocabulary.
#[derive(Parser, Debug)]
#[command(name = "lexan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize a C-like source file and summarize its vocabulary", long_about = None)]
struct Cli {
    /// Source file to scan
    file: PathBuf,

    /// Also print every token in source order
    #[arg(long, env = "LEXAN_TOKENS")]
    tokens: bool,

    /// Enable debug logging
    #[arg(short, long, env = "LEXAN_VERBOSE")]
    verbose: bool,

    /// Disable color in log output
    #[arg(long, env = "LEXAN_NO_COLOR")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    let start = Instant::now();

    let source = match load_source(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            display_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli.file.to_string_lossy().into_owned();
    let lexed = match lex(&source, Some(file_name)) {
        Ok(lexed) => lexed,
        Err(e) => {
            display_error(&e);
            return ExitCode::FAILURE;
        }
    };

    debug!("Tokenized in {:?}", start.elapsed());

    let printed = print_cleaned(lexed.cleaned_text())
        .and_then(|_| if cli.tokens { render(&lexed.tokens) } else { Ok(()) })
        .and_then(|_| summarize(&lexed.tokens));

    if let Err(e) = printed {
        error!("failed to write report: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}
