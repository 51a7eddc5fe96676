//! Result codes
//!
//! Two-level status reported by the store after every call: a primary code
//! (success / error) and a detail code saying which kind of error.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Primary Codes
// =============================================================================

pub const SUCCESS: i64 = 0;
pub const ERROR: i64 = 1;

// =============================================================================
// Detail Codes
// =============================================================================

pub const DETAIL_NONE: i64 = 0;
/// Key, queue or element does not exist (or has expired)
pub const NOT_FOUND: i64 = 1;
/// Password does not unlock the value
pub const ACCESS_DENIED: i64 = 2;
/// Parent key or queue attributes reject the mutation
pub const PARENT_ATTRS: i64 = 3;
/// Target key already exists
pub const EXISTS: i64 = 4;
/// Store rejected the request parameters
pub const INVALID_REQUEST: i64 = 5;

/// First transport-class detail code; everything at or above it means the
/// call never completed on the store.
pub const TRANSPORT_BASE: i64 = 0x100;
pub const COMM_ERROR: i64 = 0x100;
pub const NOT_CONNECTED: i64 = 0x101;
pub const TIMEOUT: i64 = 0x102;

/// Codes captured immediately after one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultCodes {
    pub primary: i64,
    pub detail: i64,
}

impl ResultCodes {
    pub fn new(primary: i64, detail: i64) -> Self {
        Self { primary, detail }
    }

    /// Codes of a successful call
    pub fn ok() -> Self {
        Self::new(SUCCESS, DETAIL_NONE)
    }

    /// Codes of a failed call with the given detail
    pub fn error(detail: i64) -> Self {
        Self::new(ERROR, detail)
    }

    pub fn is_success(&self) -> bool {
        self.primary == SUCCESS
    }

    /// The call failed below the store (connection dropped, timeout, ...)
    /// rather than being rejected by it.
    pub fn is_transport_failure(&self) -> bool {
        self.primary != SUCCESS && self.detail >= TRANSPORT_BASE
    }

    /// Symbolic name of the detail code
    pub fn detail_name(&self) -> &'static str {
        match self.detail {
            DETAIL_NONE => "none",
            NOT_FOUND => "not-found",
            ACCESS_DENIED => "access-denied",
            PARENT_ATTRS => "parent-attrs",
            EXISTS => "exists",
            INVALID_REQUEST => "invalid-request",
            COMM_ERROR => "comm-error",
            NOT_CONNECTED => "not-connected",
            TIMEOUT => "timeout",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ResultCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.primary, self.detail, self.detail_name())
    }
}
