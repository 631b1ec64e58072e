//! rowflat-flatten: Flatten nested JSON into path-keyed objects, or rebuild it
//!
//! Usage:
//!   # Flatten with dot-separated paths
//!   rowflat-flatten data.json
//!
//!   # Flatten with rails-style paths: a[b][0]
//!   echo '{"a": {"b": [1]}}' | rowflat-flatten --style rails
//!
//!   # Rebuild the nested document
//!   rowflat-flatten --unflatten --style rails flat.json

use anyhow::{Context, Result};
use clap::Parser;
use rowflat::{flatten, unflatten, SeparatorStyle};
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, BufReader, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rowflat-flatten")]
#[command(about = "Flatten nested JSON into path-keyed objects", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Rebuild a nested document from a flat one
    #[arg(long, short = 'u')]
    unflatten: bool,

    /// Separator style: dot, path, rails or underscore
    #[arg(long, default_value = "dot")]
    style: String,

    /// Prefix prepended to every top-level key
    #[arg(long, default_value = "")]
    prefix: String,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rowflat=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let style = SeparatorStyle::from_name(&args.style)
        .with_context(|| format!("Unknown separator style: {}", args.style))?;

    let mut reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?,
        ))
    } else {
        Box::new(stdin())
    };
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let document: Value = serde_json::from_str(&content).context("Failed to parse JSON")?;

    let output = if args.unflatten {
        let Value::Object(flat) = document else {
            anyhow::bail!("Flat input must be a JSON object");
        };
        unflatten(&flat, &args.prefix, &style)?
    } else {
        Value::Object(flatten(&document, &args.prefix, &style)?)
    };

    let output = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };

    println!("{}", output);

    Ok(())
}
