//! Command options
//!
//! Optional fields shared by command variants, with their defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KvqError, Result};

/// Queue discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueOrder {
    /// Oldest element leaves first
    #[default]
    Fifo,

    /// Newest element leaves first
    Lifo,
}

impl QueueOrder {
    pub fn is_fifo(&self) -> bool {
        matches!(self, QueueOrder::Fifo)
    }
}

impl fmt::Display for QueueOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueOrder::Fifo => f.write_str("fifo"),
            QueueOrder::Lifo => f.write_str("lifo"),
        }
    }
}

/// Validated expiration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Expiration {
    #[default]
    Never,
    After(Duration),
}

impl Expiration {
    /// Validate a signed number of seconds. Zero means [`Expiration::Never`].
    pub fn from_secs(secs: i64) -> Result<Self> {
        if secs < 0 {
            return Err(KvqError::invalid(format!(
                "expiration is negative ({}), should be greater than or equal to zero",
                secs
            )));
        }
        if secs == 0 {
            Ok(Expiration::Never)
        } else {
            Ok(Expiration::After(Duration::from_secs(secs as u64)))
        }
    }

    /// Value passed to the store: `None` for never, never a zero TTL
    pub fn ttl(&self) -> Option<Duration> {
        match self {
            Expiration::Never => None,
            Expiration::After(d) => Some(*d),
        }
    }
}

/// Optional fields of a command
///
/// Each variant reads only the fields it understands; see the variant docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOptions {
    /// Queue discipline (queue variants)
    pub order: QueueOrder,

    /// Ask the store to check the parent's attributes before mutating
    /// children. Read variants use it as "check the key's own attributes".
    pub check_parent_attrs: bool,

    /// Password gating the key or queue. `None` sends no credential at all,
    /// which the store treats differently from `Some("")`.
    pub password: Option<String>,

    /// Expiration in seconds, 0 for never. Validated at construction.
    pub expiration_secs: i64,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            order: QueueOrder::Fifo,
            check_parent_attrs: true,
            password: None,
            expiration_secs: 0,
        }
    }
}

impl CommandOptions {
    /// Create a new options builder
    pub fn builder() -> CommandOptionsBuilder {
        CommandOptionsBuilder::default()
    }
}

/// Builder for CommandOptions
#[derive(Default)]
pub struct CommandOptionsBuilder {
    options: CommandOptions,
}

impl CommandOptionsBuilder {
    /// Set the queue discipline
    pub fn order(mut self, order: QueueOrder) -> Self {
        self.options.order = order;
        self
    }

    /// Shorthand for `order(QueueOrder::Lifo)`
    pub fn lifo(self) -> Self {
        self.order(QueueOrder::Lifo)
    }

    /// Enable or disable the parent-attribute check
    pub fn check_parent_attrs(mut self, check: bool) -> Self {
        self.options.check_parent_attrs = check;
        self
    }

    /// Set the access password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.options.password = Some(password.into());
        self
    }

    /// Set the expiration in seconds (0 = never)
    pub fn expiration_secs(mut self, secs: i64) -> Self {
        self.options.expiration_secs = secs;
        self
    }

    pub fn build(self) -> CommandOptions {
        self.options
    }
}
