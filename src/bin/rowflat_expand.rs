//! rowflat-expand: Denormalize nested JSON documents into flat rows
//!
//! Usage:
//!   # Keep every leaf field, read from file
//!   rowflat-expand data.json
//!
//!   # Keep selected fields, read from stdin
//!   echo '{"F0001": "W1", "F0004": [{"C0002": "a"}]}' | rowflat-expand --fields F0001,F0004.C0002
//!
//!   # Process NDJSON, combining sibling lists into every combination
//!   rowflat-expand --ndjson --cross-product events.jsonl

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use rowflat::{expand_json, ExpandConfig, ExpandMode, Filter, RowExpander, RowWriter};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rowflat-expand")]
#[command(about = "Denormalize nested JSON into flat rows", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Comma-separated dotted paths to keep, e.g. F0001,F0004.C0002
    /// If omitted, every leaf field of each document is kept
    #[arg(long, short = 'f')]
    fields: Option<String>,

    /// Process newline-delimited JSON (one document per line)
    #[arg(long)]
    ndjson: bool,

    /// Treat a top-level array as one document instead of a document stream
    #[arg(long)]
    no_ignore_array: bool,

    /// Emit every combination of sibling list elements
    #[arg(long)]
    cross_product: bool,

    /// Maximum nesting depth to walk
    #[arg(long)]
    max_depth: Option<usize>,

    /// Add a `_document` field with the ordinal of the source document
    #[arg(long)]
    tag_documents: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rowflat=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Build config
    let mut config = ExpandConfig::default();
    if args.cross_product {
        config.mode = ExpandMode::CrossProduct;
    }
    config.max_depth = args.max_depth;

    let filter = args.fields.as_deref().map(Filter::parse_list);

    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?,
        ))
    } else {
        Box::new(std::io::stdin())
    };

    let stdout = std::io::stdout();
    let mut writer = RowWriter::new(stdout.lock());
    if args.tag_documents {
        writer = writer.with_document_tag();
    }

    let documents = if args.ndjson {
        expand_json(BufReader::new(reader), &mut writer, filter.as_ref(), config)?
    } else {
        process_reader(reader, filter.as_ref(), config, !args.no_ignore_array, &mut writer)?
    };

    writer.flush()?;

    if documents == 0 {
        tracing::warn!("No JSON documents found in input");
    }
    tracing::info!(documents, rows = writer.rows_written(), "done");

    Ok(())
}

/// Parse a whole input with SIMD and expand each document in it
fn process_reader<R: Read, W: Write>(
    mut reader: R,
    filter: Option<&Filter>,
    config: ExpandConfig,
    ignore_array: bool,
    writer: &mut RowWriter<W>,
) -> Result<usize> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(0);
    }

    let value: Value =
        simd_json::serde::from_slice(&mut content).context("Failed to parse JSON")?;

    let expander = RowExpander::new(config);
    let documents = match value {
        Value::Array(items) if ignore_array => items,
        document => vec![document],
    };

    for (idx, document) in documents.iter().enumerate() {
        let rows = match filter {
            Some(filter) => expander.expand(document, filter),
            None => expander.expand_derived(document),
        }
        .with_context(|| format!("Failed to expand document {}", idx))?;
        writer.write_rows(idx, &rows)?;
    }

    Ok(documents.len())
}
