//! respio CLI
//!
//! Encodes commands to RESP on stdout, or decodes RESP from stdin.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use respio::{Config, Param, RespReader, RespWriter, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// respio CLI
#[derive(Parser, Debug)]
#[command(name = "respio")]
#[command(about = "Encode and decode the Redis Serialization Protocol")]
#[command(version)]
struct Args {
    /// Maximum array nesting depth accepted when decoding
    #[arg(long, default_value = "512")]
    max_depth: usize,

    /// Maximum bulk length in bytes accepted when decoding
    #[arg(long, default_value = "536870912")]
    max_bulk: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a command as RESP to stdout
    Encode {
        /// Command name
        name: String,

        /// Command parameters, sent as bulk strings
        params: Vec<String>,

        /// Show CR and LF as escapes instead of raw bytes
        #[arg(short, long)]
        escape: bool,
    },

    /// Read RESP units from stdin and print them
    Decode {
        /// Interpret each unit as a command
        #[arg(short, long)]
        command: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only protocol output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,respio=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .max_nesting_depth(args.max_depth)
        .max_bulk_len(args.max_bulk)
        .build();

    let result = match args.command {
        Commands::Encode {
            name,
            params,
            escape,
        } => encode(&config, &name, params, escape),
        Commands::Decode { command } => decode(&config, command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn encode(config: &Config, name: &str, params: Vec<String>, escape: bool) -> respio::Result<()> {
    let params: Vec<Param> = params.into_iter().map(Param::from).collect();

    let mut writer = RespWriter::with_config(Vec::new(), config);
    writer.write_command(name, &params)?;
    let wire = writer.into_inner()?;

    let mut stdout = io::stdout().lock();
    if escape {
        writeln!(stdout, "{}", wire.escape_ascii())?;
    } else {
        stdout.write_all(&wire)?;
    }
    stdout.flush()?;
    Ok(())
}

fn decode(config: &Config, as_command: bool) -> respio::Result<()> {
    let mut reader = RespReader::with_config(io::stdin().lock(), config);
    let mut stdout = io::stdout().lock();
    let mut units = 0u64;

    loop {
        let line = if as_command {
            reader.read_command().map(|cmd| {
                let params: Vec<String> = cmd.params.iter().map(render).collect();
                format!("{} [{}]", cmd.name, params.join(", "))
            })
        } else {
            reader.decode().map(|value| render(&value))
        };

        match line {
            Ok(line) => {
                writeln!(stdout, "{}", line)?;
                units += 1;
            }
            Err(e) if e.is_eof() => {
                tracing::debug!("End of input after {} units", units);
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Render a value in a compact, redis-cli like form
fn render(value: &Value) -> String {
    match value {
        Value::Null => "(nil)".to_string(),
        Value::Simple(s) => String::from_utf8_lossy(s).into_owned(),
        Value::Error(e) => format!("(error) {}", String::from_utf8_lossy(e)),
        Value::Integer(i) => format!("(integer) {}", i),
        Value::Bulk(b) => format!("\"{}\"", b.escape_ascii()),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}
