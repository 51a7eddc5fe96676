//! Argument checks shared by every command constructor
//!
//! Constructors call these in a fixed order (key, value, expiration, then
//! variant-specific fields) and stop at the first failure.

use crate::error::{KvqError, Result};

/// Keys, prefixes and subkey names must be non-empty
pub(crate) fn require_key(field: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvqError::invalid(format!("{} is empty", field)));
    }
    Ok(())
}

/// An optional key, when given, must be non-empty
pub(crate) fn optional_key(field: &str, key: Option<&str>) -> Result<()> {
    match key {
        Some(k) => require_key(field, k),
        None => Ok(()),
    }
}

/// Write variants need a value; the empty string is accepted
pub(crate) fn require_value(field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| KvqError::invalid(format!("{} is missing", field)))
}

/// Removal counts start at one
pub(crate) fn require_count(count: u32) -> Result<u32> {
    if count == 0 {
        return Err(KvqError::invalid("count should be greater than zero"));
    }
    Ok(count)
}
