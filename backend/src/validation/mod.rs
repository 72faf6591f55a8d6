//! JSON Schema validation for catalog snapshot documents.
//!
//! Snapshot files are checked against an embedded JSON Schema (Draft 7)
//! before they are deserialized, so a broken export is rejected with one
//! message per offending field instead of a single serde error.
//!
//! # Embedded Schema
//!
//! Embedded at compile time from `schemas/catalog-snapshot.json`. All five
//! entity arrays are required: a snapshot missing a kind must fail rather
//! than be analyzed as "no duplicates".
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use catalog_integrity::validate_snapshot;
//!
//! let doc = json!({
//!     "assets": [], "works": [], "artists": [], "categories": [], "labels": []
//! });
//! assert!(validate_snapshot(&doc).is_ok());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static SNAPSHOT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/catalog-snapshot.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with one message per error otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a whole snapshot document.
pub fn validate_snapshot(data: &Value) -> Result<(), Vec<String>> {
    validate(&SNAPSHOT_SCHEMA, data)
}

/// Quick check against the snapshot schema.
pub fn is_valid_snapshot(data: &Value) -> bool {
    is_valid(&SNAPSHOT_SCHEMA, data)
}
