//! Command-line entry point: reads a circuit description in JSON and writes
//! its `quill` diagram.
//!
//! ```text
//! $ quill-draw bell.json --imports -o bell.typ
//! $ cat bell.json | LOGGING_LEVEL=debug quill-draw
//! ```

use std::{ fs, io::{ self, Read, Write }, path::PathBuf };
use anyhow::Context;
use clap::{ Parser, ValueEnum };
use tracing::{ debug, info };
use tracing_subscriber::EnvFilter;
use quill_draw::{ Circuit, DrawOptions };

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LoggingLevel {
    Critical,
    Debug,
    Error,
    Info,
    Warning,
}

impl LoggingLevel {
    fn directive(self) -> &'static str {
        match self {
            // tracing has no level above `error`
            Self::Critical | Self::Error => "error",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
        }
    }
}

/// Draw a quantum circuit as Typst markup for the `quill` package.
#[derive(Parser, Debug)]
#[command(name = "quill-draw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Circuit description in JSON; read from stdin if omitted
    input: Option<PathBuf>,

    /// Write the diagram here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Omit the leading `#` (for use inside Typst code mode)
    #[arg(long)]
    no_hash: bool,

    /// Prepend `#import` lines for the physica and quill packages
    #[arg(long)]
    imports: bool,

    /// Logging level, case insensitive
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        env = "LOGGING_LEVEL",
        default_value = "info"
    )]
    logging_level: LoggingLevel,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        },
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        },
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.logging_level.directive()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let text = read_input(cli.input.as_ref())?;
    let circuit: Circuit =
        serde_json::from_str(&text).context("malformed circuit description")?;
    debug!(
        "read circuit with {} qubits, {} clbits, {} operations",
        circuit.num_qubits(), circuit.num_clbits(), circuit.num_ops(),
    );

    let opts =
        DrawOptions::default()
        .leading_hash(!cli.no_hash)
        .imports(cli.imports);
    let typst = circuit.draw(&opts)?;

    match cli.output.as_ref() {
        Some(path) => {
            fs::write(path, typst.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        },
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", typst)?;
        },
    }
    Ok(())
}
