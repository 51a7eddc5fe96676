//! Command results
//!
//! The single outcome record every command returns.

use std::fmt;

use serde::Serialize;

use crate::session::{Outcome, ResultCodes};

/// Why a call failed, derived from its detail code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The store rejected the operation (empty queue, wrong password, ...)
    Business,

    /// The call did not complete on the store
    Transport,
}

/// Immutable outcome of one `execute`
///
/// `success == false` does not imply `value` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult<T> {
    operation: &'static str,
    success: bool,
    value: Option<T>,
    primary_code: i64,
    detail_code: i64,
}

impl<T> CommandResult<T> {
    pub fn new(
        operation: &'static str,
        success: bool,
        value: Option<T>,
        codes: ResultCodes,
    ) -> Self {
        Self {
            operation,
            success,
            value,
            primary_code: codes.primary,
            detail_code: codes.detail,
        }
    }

    pub(crate) fn from_outcome(
        operation: &'static str,
        outcome: &Outcome,
        value: Option<T>,
    ) -> Self {
        Self::new(operation, outcome.success, value, outcome.codes)
    }

    /// Name of the command that produced this result
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Raw success flag reported by the store
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn primary_code(&self) -> i64 {
        self.primary_code
    }

    pub fn detail_code(&self) -> i64 {
        self.detail_code
    }

    pub fn codes(&self) -> ResultCodes {
        ResultCodes::new(self.primary_code, self.detail_code)
    }

    /// Classify a failed result; `None` on success
    pub fn failure(&self) -> Option<Failure> {
        if self.success {
            None
        } else if self.codes().is_transport_failure() {
            Some(Failure::Transport)
        } else {
            Some(Failure::Business)
        }
    }

    /// Convert the value, keeping everything else
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CommandResult<U> {
        CommandResult {
            operation: self.operation,
            success: self.success,
            value: self.value.map(f),
            primary_code: self.primary_code,
            detail_code: self.detail_code,
        }
    }
}

impl<T: fmt::Display> fmt::Display for CommandResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} codes={}",
            self.operation,
            if self.success { "OK" } else { "FAILED" },
            self.codes()
        )?;
        if let Some(value) = &self.value {
            write!(f, " value={}", value)?;
        }
        Ok(())
    }
}

/// Payload of a result when the command type is only known at runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::List(items) => write!(f, "{:?}", items),
            Value::Pairs(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {:?}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}
