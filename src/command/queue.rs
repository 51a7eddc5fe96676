//! Queue commands
//!
//! Push and pop over elements sharing a prefix. Plain queues hold values;
//! keyed queues hold key/value pairs and also store the pair as a key.
//!
//! ## Example
//! ```
//! use kvqueue::command::{QueueAdd, QueueRemove};
//! use kvqueue::memory::MemoryStore;
//! use kvqueue::session::SerializedSession;
//!
//! let session = SerializedSession::new(MemoryStore::new());
//!
//! let add = QueueAdd::new("q1", "e1").unwrap();
//! assert!(add.execute(&session).unwrap().is_success());
//!
//! let rm = QueueRemove::new("q1").unwrap();
//! let popped = rm.execute(&session).unwrap().into_value().unwrap();
//! assert_eq!(popped, vec!["e1".to_string()]);
//! ```

use crate::error::Result;
use crate::session::{Call, Session};

use super::options::{CommandOptions, Expiration, QueueOrder};
use super::result::CommandResult;
use super::{dispatch, validate};

// =============================================================================
// QueueAdd
// =============================================================================

/// Add one element to a queue
///
/// Value of the result: the success flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueAdd {
    prefix: String,
    value: String,
    order: QueueOrder,
    check_parent_attrs: bool,
    password: Option<String>,
    expiration: Expiration,
}

impl QueueAdd {
    pub const NAME: &'static str = "QueueAddCmd";

    /// FIFO, parent check on, no password, never expires
    pub fn new(prefix: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::with_options(prefix, value, CommandOptions::default())
    }

    pub fn with_options(
        prefix: impl Into<String>,
        value: impl Into<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        Self::build(prefix.into(), Some(value.into()), options)
    }

    pub(crate) fn build(
        prefix: String,
        value: Option<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        validate::require_key("prefix", &prefix)?;
        let value = validate::require_value("value", value)?;
        let expiration = Expiration::from_secs(options.expiration_secs)?;

        Ok(Self {
            prefix,
            value,
            order: options.order,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
            expiration,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn check_parent_attrs(&self) -> bool {
        self.check_parent_attrs
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::QueuePush {
            prefix: &self.prefix,
            key: None,
            value: &self.value,
            order: self.order,
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
            ttl: self.expiration.ttl(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}

// =============================================================================
// QueueRemove
// =============================================================================

/// Remove up to `count` elements from a queue
///
/// Value of the result: the removed values, in removal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRemove {
    prefix: String,
    count: u32,
    order: QueueOrder,
    check_parent_attrs: bool,
    password: Option<String>,
}

impl QueueRemove {
    pub const NAME: &'static str = "QueueRemoveCmd";

    /// One element, FIFO, parent check on, no password
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        Self::with_options(prefix, 1, CommandOptions::default())
    }

    /// `options.expiration_secs` is checked but not sent; removal has no TTL
    pub fn with_options(
        prefix: impl Into<String>,
        count: u32,
        options: CommandOptions,
    ) -> Result<Self> {
        let prefix = prefix.into();
        validate::require_key("prefix", &prefix)?;
        Expiration::from_secs(options.expiration_secs)?;
        let count = validate::require_count(count)?;

        Ok(Self {
            prefix,
            count,
            order: options.order,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn check_parent_attrs(&self) -> bool {
        self.check_parent_attrs
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn execute<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> Result<CommandResult<Vec<String>>> {
        let call = Call::QueuePop {
            prefix: &self.prefix,
            count: self.count,
            with_keys: false,
            order: self.order,
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::new(
            Self::NAME,
            outcome.success,
            outcome.payload.into_list(),
            outcome.codes,
        ))
    }
}

// =============================================================================
// KeyQueueAdd
// =============================================================================

/// Add a key/value pair to a keyed queue
///
/// Value of the result: the success flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyQueueAdd {
    prefix: String,
    key: String,
    value: String,
    order: QueueOrder,
    check_parent_attrs: bool,
    password: Option<String>,
    expiration: Expiration,
}

impl KeyQueueAdd {
    pub const NAME: &'static str = "KeyQueueAddCmd";

    pub fn new(
        prefix: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::with_options(prefix, key, value, CommandOptions::default())
    }

    pub fn with_options(
        prefix: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        Self::build(prefix.into(), key.into(), Some(value.into()), options)
    }

    pub(crate) fn build(
        prefix: String,
        key: String,
        value: Option<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        validate::require_key("prefix", &prefix)?;
        let value = validate::require_value("value", value)?;
        let expiration = Expiration::from_secs(options.expiration_secs)?;
        validate::require_key("key", &key)?;

        Ok(Self {
            prefix,
            key,
            value,
            order: options.order,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
            expiration,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn check_parent_attrs(&self) -> bool {
        self.check_parent_attrs
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::QueuePush {
            prefix: &self.prefix,
            key: Some(&self.key),
            value: &self.value,
            order: self.order,
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
            ttl: self.expiration.ttl(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}

// =============================================================================
// KeyQueueRemove
// =============================================================================

/// Remove up to `count` key/value pairs from a keyed queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyQueueRemove {
    prefix: String,
    count: u32,
    order: QueueOrder,
    check_parent_attrs: bool,
    password: Option<String>,
}

impl KeyQueueRemove {
    pub const NAME: &'static str = "KeyQueueRemoveCmd";

    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        Self::with_options(prefix, 1, CommandOptions::default())
    }

    pub fn with_options(
        prefix: impl Into<String>,
        count: u32,
        options: CommandOptions,
    ) -> Result<Self> {
        let prefix = prefix.into();
        validate::require_key("prefix", &prefix)?;
        Expiration::from_secs(options.expiration_secs)?;
        let count = validate::require_count(count)?;

        Ok(Self {
            prefix,
            count,
            order: options.order,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn check_parent_attrs(&self) -> bool {
        self.check_parent_attrs
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn execute<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> Result<CommandResult<Vec<(String, String)>>> {
        let call = Call::QueuePop {
            prefix: &self.prefix,
            count: self.count,
            with_keys: true,
            order: self.order,
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::new(
            Self::NAME,
            outcome.success,
            outcome.payload.into_pairs(),
            outcome.codes,
        ))
    }
}
