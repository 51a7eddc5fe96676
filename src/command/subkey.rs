//! Subkey commands
//!
//! A key can own a list of subkeys; each subkey is a key in its own right.

use crate::error::Result;
use crate::session::{Call, Session};

use super::options::{CommandOptions, Expiration};
use super::result::CommandResult;
use super::{dispatch, validate};

/// Write a subkey and register it in the parent key's subkey list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSubkey {
    key: String,
    subkey: String,
    value: String,
    check_parent_attrs: bool,
    password: Option<String>,
    expiration: Expiration,
}

impl AddSubkey {
    pub const NAME: &'static str = "AddSubkeyCmd";

    pub fn new(
        key: impl Into<String>,
        subkey: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::with_options(key, subkey, value, CommandOptions::default())
    }

    pub fn with_options(
        key: impl Into<String>,
        subkey: impl Into<String>,
        value: impl Into<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        Self::build(key.into(), subkey.into(), Some(value.into()), options)
    }

    pub(crate) fn build(
        key: String,
        subkey: String,
        value: Option<String>,
        options: CommandOptions,
    ) -> Result<Self> {
        validate::require_key("key", &key)?;
        let value = validate::require_value("value", value)?;
        let expiration = Expiration::from_secs(options.expiration_secs)?;
        validate::require_key("subkey", &subkey)?;

        Ok(Self {
            key,
            subkey,
            value,
            check_parent_attrs: options.check_parent_attrs,
            password: options.password,
            expiration,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn subkey(&self) -> &str {
        &self.subkey
    }

    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<bool>> {
        let call = Call::AddSubkey {
            key: &self.key,
            subkey: &self.subkey,
            value: &self.value,
            check_parent_attrs: self.check_parent_attrs,
            password: self.password.as_deref(),
            ttl: self.expiration.ttl(),
        };
        let outcome = dispatch(session, Self::NAME, &call)?;
        Ok(CommandResult::from_outcome(Self::NAME, &outcome, Some(outcome.success)))
    }
}

/// List the subkeys of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubkeys {
    key: String,
    check_attrs: bool,
    password: Option<String>,
}

impl GetSubkeys {
    pub const NAME: &'static str = "GetSubkeysCmd";

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

    pub fn execute<S: Session + ?Sized>(
        &self,
        session: &S,
    ) -> Result<CommandResult<Vec<String>>> {
        let call = Call::GetSubkeys {
            key: &self.key,
            check_attrs: self.check_attrs,
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
