// SPDX-License-Identifier: GPL-3.0-only

//! Parsing logic for touch-model and key-layout JSON resources.
//!
//! Each resource is parsed with serde_json, converted into its immutable
//! table form, and validated. Parse failures are fatal for that resource;
//! validation findings are returned as warnings.

use crate::layout::types::{
    KeyLayout, KeyLayoutFile, LoadError, LoadResult, TouchModel, TouchModelFile,
};
use crate::layout::validation::{validate_key_layout, validate_touch_model};
use std::fs;
use std::path::Path;

/// Parses a touch model from a JSON file.
///
/// I/O failures are reported as [`LoadError::NotFound`] and malformed content
/// as [`LoadError::ParseError`], both carrying the file path.
///
/// # Example
///
/// ```rust,ignore
/// use ankkit::layout::parse_touch_model_file;
///
/// match parse_touch_model_file("resources/qwerty_en_touch_model.json") {
///     Ok(result) => println!("Loaded {} touch targets", result.value.len()),
///     Err(e) => eprintln!("Failed to load touch model: {}", e),
/// }
/// ```
pub fn parse_touch_model_file(path: impl AsRef<Path>) -> Result<LoadResult<TouchModel>, LoadError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let bytes = fs::read(path).map_err(|e| LoadError::io_error_with_path(e, &display_path))?;
    parse_touch_model_bytes(&bytes, Some(&display_path))
}

/// Parses a touch model from a JSON string.
pub fn parse_touch_model_from_string(json: &str) -> Result<LoadResult<TouchModel>, LoadError> {
    parse_touch_model_bytes(json.as_bytes(), None)
}

/// Parses touch-model bytes, attributing errors to `resource` when given.
pub fn parse_touch_model_bytes(
    bytes: &[u8],
    resource: Option<&str>,
) -> Result<LoadResult<TouchModel>, LoadError> {
    let file: TouchModelFile = parse_json(bytes, resource)?;
    Ok(validate_touch_model(TouchModel::from(file)))
}

/// Parses a key layout from a JSON file.
pub fn parse_key_layout_file(path: impl AsRef<Path>) -> Result<LoadResult<KeyLayout>, LoadError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let bytes = fs::read(path).map_err(|e| LoadError::io_error_with_path(e, &display_path))?;
    parse_key_layout_bytes(&bytes, Some(&display_path))
}

/// Parses a key layout from a JSON string.
pub fn parse_key_layout_from_string(json: &str) -> Result<LoadResult<KeyLayout>, LoadError> {
    parse_key_layout_bytes(json.as_bytes(), None)
}

/// Parses key-layout bytes, attributing errors to `resource` when given.
pub fn parse_key_layout_bytes(
    bytes: &[u8],
    resource: Option<&str>,
) -> Result<LoadResult<KeyLayout>, LoadError> {
    let file: KeyLayoutFile = parse_json(bytes, resource)?;
    Ok(validate_key_layout(KeyLayout::from(file)))
}

fn parse_json<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
    resource: Option<&str>,
) -> Result<T, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| match resource {
        Some(name) => LoadError::json_error_with_resource(e, name),
        None => LoadError::json_error(e),
    })
}

// ============================================================================
// Tests
// ============================================================================
