//! Runtime command factory
//!
//! A flat, serializable description of a command. `into_command` runs the
//! same validation as the typed constructors, in the same order.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::kv::{Get, Remove, Rename, Set};
use super::options::{CommandOptions, Expiration};
use super::queue::{KeyQueueAdd, KeyQueueRemove, QueueAdd, QueueRemove};
use super::subkey::{AddSubkey, GetSubkeys};
use super::{Command, CommandKind};

/// Description of a command to build
///
/// Field use by kind:
/// - `key`: queue prefix or key, always required
/// - `value`: required by `QueueAdd`, `KeyQueueAdd`, `Set`, `AddSubkey`
/// - `aux`: element key (`KeyQueueAdd`), subkey (`AddSubkey`), new key (`Rename`)
/// - `parent`: parent key (`Rename`)
/// - `count`: element count for removals, default 1
/// - `subkeys`: clear the subkey list (`Set`) or delete subkeys (`Remove`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub kind: CommandKind,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub aux: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub subkeys: bool,
    #[serde(default)]
    pub options: CommandOptions,
}

impl Request {
    pub fn new(kind: CommandKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            value: None,
            aux: None,
            parent: None,
            count: None,
            subkeys: false,
            options: CommandOptions::default(),
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn aux(mut self, aux: impl Into<String>) -> Self {
        self.aux = Some(aux.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn subkeys(mut self, subkeys: bool) -> Self {
        self.subkeys = subkeys;
        self
    }

    pub fn options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate and build the command
    pub fn into_command(self) -> Result<Command> {
        let Request {
            kind,
            key,
            value,
            aux,
            parent,
            count,
            subkeys,
            options,
        } = self;
        let count = count.unwrap_or(1);

        let command = match kind {
            CommandKind::QueueAdd => Command::QueueAdd(QueueAdd::build(key, value, options)?),
            CommandKind::QueueRemove => {
                Command::QueueRemove(QueueRemove::with_options(key, count, options)?)
            }
            CommandKind::KeyQueueAdd => Command::KeyQueueAdd(KeyQueueAdd::build(
                key,
                aux.unwrap_or_default(),
                value,
                options,
            )?),
            CommandKind::KeyQueueRemove => {
                Command::KeyQueueRemove(KeyQueueRemove::with_options(key, count, options)?)
            }
            CommandKind::Get => Command::Get(Get::with_options(key, options)?),
            CommandKind::Set => Command::Set(Set::build(key, value, subkeys, options)?),
            CommandKind::Remove => {
                let remove = Remove::with_subkeys(key, subkeys)?;
                Expiration::from_secs(options.expiration_secs)?;
                Command::Remove(remove)
            }
            CommandKind::Rename => Command::Rename(Rename::with_options(
                key,
                aux.unwrap_or_default(),
                parent,
                options,
            )?),
            CommandKind::AddSubkey => Command::AddSubkey(AddSubkey::build(
                key,
                aux.unwrap_or_default(),
                value,
                options,
            )?),
            CommandKind::GetSubkeys => {
                Command::GetSubkeys(GetSubkeys::with_options(key, options)?)
            }
        };

        Ok(command)
    }
}
