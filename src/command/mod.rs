//! Command Module
//!
//! Immutable, validated requests against a cluster session.
//!
//! ## Lifecycle
//! ```text
//!   new / with_options / Request::into_command      (validate, fail fast)
//!            │
//!            ▼
//!   execute(&session) ──▶ Session::call ──▶ CommandResult<T>
//!            │                                 success, value,
//!            └── may run again                 primary / detail code
//! ```
//!
//! ## Two channels
//! - `Err(KvqError)`: bad arguments or an unusable session. Nothing was sent,
//!   or the session could not send it.
//! - `Ok(CommandResult)` with `is_success() == false`: the store said no.
//!   This is data, not an error.
//!
//! ## Variants
//! | Command | Value |
//! |---|---|
//! | [`QueueAdd`] / [`KeyQueueAdd`] | `bool` |
//! | [`QueueRemove`] | `Vec<String>` |
//! | [`KeyQueueRemove`] | `Vec<(String, String)>` |
//! | [`Get`] | `String` |
//! | [`Set`] / [`Remove`] / [`Rename`] / [`AddSubkey`] | `bool` |
//! | [`GetSubkeys`] | `Vec<String>` |

mod kv;
mod options;
mod queue;
mod request;
mod result;
mod subkey;
mod validate;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{Call, Outcome, Session};

pub use kv::{Get, Remove, Rename, Set};
pub use options::{CommandOptions, CommandOptionsBuilder, Expiration, QueueOrder};
pub use queue::{KeyQueueAdd, KeyQueueRemove, QueueAdd, QueueRemove};
pub use request::Request;
pub use result::{CommandResult, Failure, Value};
pub use subkey::{AddSubkey, GetSubkeys};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    QueueAdd,
    QueueRemove,
    KeyQueueAdd,
    KeyQueueRemove,
    Get,
    Set,
    Remove,
    Rename,
    AddSubkey,
    GetSubkeys,
}

/// Any command, for callers that pick the operation at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    QueueAdd(QueueAdd),
    QueueRemove(QueueRemove),
    KeyQueueAdd(KeyQueueAdd),
    KeyQueueRemove(KeyQueueRemove),
    Get(Get),
    Set(Set),
    Remove(Remove),
    Rename(Rename),
    AddSubkey(AddSubkey),
    GetSubkeys(GetSubkeys),
}

impl Command {
    /// Get the command type
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::QueueAdd(_) => CommandKind::QueueAdd,
            Command::QueueRemove(_) => CommandKind::QueueRemove,
            Command::KeyQueueAdd(_) => CommandKind::KeyQueueAdd,
            Command::KeyQueueRemove(_) => CommandKind::KeyQueueRemove,
            Command::Get(_) => CommandKind::Get,
            Command::Set(_) => CommandKind::Set,
            Command::Remove(_) => CommandKind::Remove,
            Command::Rename(_) => CommandKind::Rename,
            Command::AddSubkey(_) => CommandKind::AddSubkey,
            Command::GetSubkeys(_) => CommandKind::GetSubkeys,
        }
    }

    /// Operation name echoed into results
    pub fn operation(&self) -> &'static str {
        match self {
            Command::QueueAdd(_) => QueueAdd::NAME,
            Command::QueueRemove(_) => QueueRemove::NAME,
            Command::KeyQueueAdd(_) => KeyQueueAdd::NAME,
            Command::KeyQueueRemove(_) => KeyQueueRemove::NAME,
            Command::Get(_) => Get::NAME,
            Command::Set(_) => Set::NAME,
            Command::Remove(_) => Remove::NAME,
            Command::Rename(_) => Rename::NAME,
            Command::AddSubkey(_) => AddSubkey::NAME,
            Command::GetSubkeys(_) => GetSubkeys::NAME,
        }
    }

    /// Execute whichever command this is
    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> Result<CommandResult<Value>> {
        Ok(match self {
            Command::QueueAdd(c) => c.execute(session)?.map(Value::Bool),
            Command::QueueRemove(c) => c.execute(session)?.map(Value::List),
            Command::KeyQueueAdd(c) => c.execute(session)?.map(Value::Bool),
            Command::KeyQueueRemove(c) => c.execute(session)?.map(Value::Pairs),
            Command::Get(c) => c.execute(session)?.map(Value::Text),
            Command::Set(c) => c.execute(session)?.map(Value::Bool),
            Command::Remove(c) => c.execute(session)?.map(Value::Bool),
            Command::Rename(c) => c.execute(session)?.map(Value::Bool),
            Command::AddSubkey(c) => c.execute(session)?.map(Value::Bool),
            Command::GetSubkeys(c) => c.execute(session)?.map(Value::List),
        })
    }
}

/// Send one call and log a failed one
///
/// Store rejections log at warn; failures below the store log at error.
pub(crate) fn dispatch<S: Session + ?Sized>(
    session: &S,
    operation: &'static str,
    call: &Call<'_>,
) -> Result<Outcome> {
    let outcome = session.call(call)?;

    if !outcome.success {
        if outcome.codes.is_transport_failure() {
            tracing::error!(
                operation = operation,
                key = call.target(),
                codes = %outcome.codes,
                "{} did not reach the store",
                call.native_name()
            );
        } else {
            tracing::warn!(
                operation = operation,
                key = call.target(),
                codes = %outcome.codes,
                "{} returned false",
                call.native_name()
            );
        }
    }

    Ok(outcome)
}
