//! leafdb CLI
//!
//! Interactive shell over a leafdb page file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use leafdb::shell::{Flow, Shell, PROMPT};
use leafdb::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// leafdb CLI
#[derive(Parser, Debug)]
#[command(name = "leafdb-cli")]
#[command(about = "Interactive shell for the leafdb single-file table engine")]
#[command(version)]
struct Args {
    /// Database file to open at startup (use `.open <file>` otherwise)
    db_path: Option<PathBuf>,

    /// Maximum number of pages the pager will address
    #[arg(long, default_value_t = leafdb::pager::TABLE_MAX_PAGES)]
    max_pages: u32,

    /// Skip fsync when closing the database
    #[arg(long)]
    no_sync: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with shell output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,leafdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("leafdb v{}", leafdb::VERSION);

    let mut builder = Config::builder()
        .max_pages(args.max_pages)
        .sync_on_close(!args.no_sync);
    if let Some(path) = &args.db_path {
        builder = builder.db_path(path);
    }
    let config = builder.build();

    let shell = match args.db_path {
        Some(_) => Shell::open(config),
        None => Ok(Shell::new(config)),
    };
    let mut shell = match shell {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            eprintln!("Error opening database file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = match run(&mut shell) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Shell error: {}", e);
            ExitCode::FAILURE
        }
    };

    if let Err(e) = shell.close() {
        tracing::error!("Failed to close database: {}", e);
        eprintln!("Error closing database: {}", e);
        return ExitCode::FAILURE;
    }

    code
}

/// Read lines until `.exit` or end of input
fn run(shell: &mut Shell) -> leafdb::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            return Ok(());
        };

        if shell.handle_line(&line?, &mut stdout)? == Flow::Quit {
            return Ok(());
        }
    }
}
