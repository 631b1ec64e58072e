//! JSON text boundary for the flatten and expansion transforms
//!
//! Inputs are checked to look like a JSON object before they are parsed.

use crate::error::{Error, Result};
use crate::flatten::{flatten, unflatten, SeparatorStyle};
use crate::rows::{ExpandConfig, Filter, Row, RowExpander};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static JSON_OBJECT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\{").unwrap());

fn parse_object(text: &str) -> Result<Map<String, Value>> {
    if !JSON_OBJECT_REGEX.is_match(text) {
        return Err(Error::InvalidStructuredText);
    }
    Ok(serde_json::from_str(text)?)
}

/// Flatten a JSON object given as text, returning the flat object as text
pub fn flatten_str(text: &str, prefix: &str, style: &SeparatorStyle) -> Result<String> {
    let nested = Value::Object(parse_object(text)?);
    let flat = flatten(&nested, prefix, style)?;
    Ok(serde_json::to_string(&flat)?)
}

/// Rebuild a nested JSON object from flat JSON text
pub fn unflatten_str(text: &str, prefix: &str, style: &SeparatorStyle) -> Result<String> {
    let flat = parse_object(text)?;
    let nested = unflatten(&flat, prefix, style)?;
    Ok(serde_json::to_string(&nested)?)
}

/// Expand a JSON object given as text into a JSON array of rows.
///
/// With `filter` set to `None` the filter is derived from the document.
pub fn expand_str(text: &str, filter: Option<&Filter>, config: ExpandConfig) -> Result<String> {
    let document = Value::Object(parse_object(text)?);
    let expander = RowExpander::new(config);
    let rows: Vec<Row> = match filter {
        Some(filter) => expander.expand(&document, filter)?,
        None => expander.expand_derived(&document)?,
    };
    Ok(serde_json::to_string(&rows)?)
}
