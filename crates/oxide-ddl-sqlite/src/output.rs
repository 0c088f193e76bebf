//! Input and output helpers for the command-line tool.

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Reads DDL text from `path`, or from stdin when no path is given.
///
/// # Errors
///
/// Returns [`crate::CatalogError::Io`] if reading fails.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Renders a value as JSON, indented when `pretty` is set.
///
/// # Errors
///
/// Returns [`crate::CatalogError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
