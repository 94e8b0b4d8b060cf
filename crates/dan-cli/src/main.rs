//! `dan` CLI: decode, encode, and pretty-print DAN files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a DAN file and print its canonical form
//! dan decode config.dan
//!
//! # Decode DAN from stdin to pretty-printed JSON
//! echo 'name: "test"' | dan decode --json
//!
//! # Encode a JSON file as DAN
//! dan encode --json data.json
//!
//! # Pretty-print DAN with four-space indentation, to a file
//! dan pretty --indent 4 config.dan -o config.pretty.dan
//!
//! # Show what the decoder tolerated
//! dan -vv decode config.dan
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use dan_core::{EncodeOptions, Object};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dan", version, about = "DAN (Data Advanced Notation) CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode DAN and print it in canonical form (or as JSON with --json)
    Decode {
        #[command(flatten)]
        io: IoArgs,
        /// Print the decoded document as pretty JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Encode DAN (or JSON with --json) as canonical DAN
    Encode {
        #[command(flatten)]
        io: IoArgs,
        /// Read the input as JSON instead of DAN
        #[arg(short, long)]
        json: bool,
    },
    /// Pretty-print DAN (or print it as JSON with --json)
    Pretty {
        #[command(flatten)]
        io: IoArgs,
        /// Print the document as pretty JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    file: Option<PathBuf>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Spaces per nesting level in DAN output
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

impl IoArgs {
    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::default().with_indent(self.indent)
    }
}

fn main() -> Result<()> {
    // Usage errors exit 1; --help and --version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            process::exit(1);
        }
    };

    match command {
        Commands::Decode { io, json } | Commands::Pretty { io, json } => {
            let input = read_input(io.file.as_deref())?;
            let doc = decode_dan(&input)?;
            let rendered = if json {
                dan_core::to_json_string_pretty(&doc).context("Failed to render JSON")?
            } else {
                dan_core::encode_with_options(&doc, &io.encode_options())
            };
            write_output(io.output.as_deref(), &rendered)?;
        }
        Commands::Encode { io, json } => {
            let input = read_input(io.file.as_deref())?;
            let doc = if json {
                dan_core::from_json_slice(&input).context("Invalid JSON input")?
            } else {
                decode_dan(&input)?
            };
            let rendered = dan_core::encode_with_options(&doc, &io.encode_options());
            write_output(io.output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Decode DAN bytes, surfacing tolerated-input diagnostics as warnings.
fn decode_dan(input: &[u8]) -> Result<Object> {
    let decoded =
        dan_core::decode_bytes_with_diagnostics(input).context("Failed to decode DAN input")?;
    for diagnostic in &decoded.diagnostics {
        warn!("{diagnostic}");
    }
    debug!(keys = decoded.value.len(), "decoded document");
    Ok(decoded.value)
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write `content` followed by a newline.
fn write_output(path: Option<&std::path::Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
