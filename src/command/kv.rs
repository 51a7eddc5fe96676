//! Key/value commands

use crate::error::Result;
use crate::session::{Call, Session};

use super::options::{CommandOptions, Expiration};
use super::result::CommandResult;
use super::{dispatch, validate};

// =============================================================================
// Get
// =============================================================================

/// Read the value of a key
///
/// `check_parent_attrs` from the options becomes `check_attrs`: when false
/// the store skips the key's expiration check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Get {
    key: String,
    check_attrs: bool,
    password: Option<String>,
}

impl Get {
    pub const NAME: &'static str = "GetCmd";

    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_options(key, CommandOptions::default())
    }

    pub fn with_options(key: impl Into<String>, options: CommandOptions) -> Result<Self> {
        let key = key.into();
        validate::require_key("key", &key)?;
        Expiration::from_secs(options.expiration_secs)?;

        Ok(Self {
            key,
            check_attrs: options.check_parent_attrs,
            password: options.password,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<String>> {
        let call = Call::Get {
            key: &self.key,
            check_attrs: self.check_attrs,
            password: self.password.as_deref(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::new(
            Self::NAME,
            outcome.success,
            outcome.payload.into_value(),
            outcome.codes,
        ))
    }
}

// =============================================================================
// Set
// =============================================================================

/// Write the value of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    key: String,
    value: String,
    clear_subkeys: bool,
    password: Option<String>,
    expiration: Expiration,
}

impl Set {
    pub const NAME: &'static str = "SetCmd";

    /// Keeps existing subkeys, no password, never expires
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::with_options(key, value, false, CommandOptions::default())
    }

    /// `clear_subkeys` drops the key's subkey list (the subkeys themselves stay)
    pub fn with_options(
        key: impl Into<String>,
        value: impl Into<String>,
        clear_subkeys: bool,
        options: CommandOptions,
    ) -> Result<Self> {
        Self::build(key.into(), Some(value.into()), clear_subkeys, options)
    }

    pub(crate) fn build(
        key: String,
        value: Option<String>,
        clear_subkeys: bool,
        options: CommandOptions,
    ) -> Result<Self> {
        validate::require_key("key", &key)?;
        let value = validate::require_value("value", value)?;
        let expiration = Expiration::from_secs(options.expiration_secs)?;

        Ok(Self {
            key,
            value,
            clear_subkeys,
            password: options.password,
            expiration,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::Set {
            key: &self.key,
            value: &self.value,
            clear_subkeys: self.clear_subkeys,
            password: self.password.as_deref(),
            ttl: self.expiration.ttl(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}

// =============================================================================
// Remove
// =============================================================================

/// Delete a key, optionally with all of its subkeys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remove {
    key: String,
    with_subkeys: bool,
}

impl Remove {
    pub const NAME: &'static str = "RemoveCmd";

    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_subkeys(key, false)
    }

    pub fn with_subkeys(key: impl Into<String>, with_subkeys: bool) -> Result<Self> {
        let key = key.into();
        validate::require_key("key", &key)?;
        Ok(Self { key, with_subkeys })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::Remove {
            key: &self.key,
            with_subkeys: self.with_subkeys,
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}

// =============================================================================
// Rename
// =============================================================================

/// Move a key to a new name
///
/// With a `parent`, the parent's subkey list is updated to the new name and
/// `check_parent_attrs` applies to that parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    key: String,
    new_key: String,
    parent: Option<String>,
    check_parent_attrs: bool,
    password: Option<String>,
    expiration: Expiration,
}

impl Rename {
    pub const NAME: &'static str = "RenameCmd";

    pub fn new(key: impl Into<String>, new_key: impl Into<String>) -> Result<Self> {
        Self::with_options(key, new_key, None::<String>, CommandOptions::default())
    }

    pub fn with_options(
        key: impl Into<String>,
        new_key: impl Into<String>,
        parent: Option<impl Into<String>>,
        options: CommandOptions,
    ) -> Result<Self> {
        let key = key.into();
        let new_key = new_key.into();
        let parent = parent.map(Into::into);

        validate::require_key("key", &key)?;
        let expiration = Expiration::from_secs(options.expiration_secs)?;
        validate::require_key("new key", &new_key)?;
        validate::optional_key("parent key", parent.as_deref())?;

        Ok(Self {
            key,
            new_key,
            parent,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
            expiration,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn new_key(&self) -> &str {
        &self.new_key
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::Rename {
            key: &self.key,
            new_key: &self.new_key,
            parent: self.parent.as_deref(),
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
            ttl: self.expiration.ttl(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}
