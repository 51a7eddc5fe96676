//! Call descriptors
//!
//! One variant per store operation. Fields borrow from the command that
//! issued the call, so building a call never allocates.

use std::time::Duration;

use crate::command::QueueOrder;

use super::codes::ResultCodes;

/// A single store operation with every argument already translated for the
/// wire: absent password is `None`, "never expires" is `ttl: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call<'a> {
    /// Push one element onto a queue (keyed when `key` is set)
    QueuePush {
        prefix: &'a str,
        key: Option<&'a str>,
        value: &'a str,
        order: QueueOrder,
        check_parent_attrs: bool,
        password: Option<&'a str>,
        ttl: Option<Duration>,
    },

    /// Pop up to `count` elements from a queue
    QueuePop {
        prefix: &'a str,
        count: u32,
        with_keys: bool,
        order: QueueOrder,
        check_parent_attrs: bool,
        password: Option<&'a str>,
    },

    /// Read a value
    Get {
        key: &'a str,
        check_attrs: bool,
        password: Option<&'a str>,
    },

    /// Write a value
    Set {
        key: &'a str,
        value: &'a str,
        clear_subkeys: bool,
        password: Option<&'a str>,
        ttl: Option<Duration>,
    },

    /// Delete a key
    Remove { key: &'a str, with_subkeys: bool },

    /// Move a key to a new name
    Rename {
        key: &'a str,
        new_key: &'a str,
        parent: Option<&'a str>,
        check_parent_attrs: bool,
        password: Option<&'a str>,
        ttl: Option<Duration>,
    },

    /// Write a subkey and register it under its parent
    AddSubkey {
        key: &'a str,
        subkey: &'a str,
        value: &'a str,
        check_parent_attrs: bool,
        password: Option<&'a str>,
        ttl: Option<Duration>,
    },

    /// List the subkeys of a key
    GetSubkeys {
        key: &'a str,
        check_attrs: bool,
        password: Option<&'a str>,
    },
}

impl Call<'_> {
    /// Name of the native operation this call maps to
    pub fn native_name(&self) -> &'static str {
        match self {
            Call::QueuePush { key: None, .. } => "q_str_push",
            Call::QueuePush { key: Some(_), .. } => "keyq_str_push",
            Call::QueuePop { with_keys: false, .. } => "q_str_pop",
            Call::QueuePop { with_keys: true, .. } => "keyq_str_pop",
            Call::Get { .. } => "get_str_value",
            Call::Set { .. } => "set_str_value",
            Call::Remove { .. } => "remove_str",
            Call::Rename { .. } => "rename_str",
            Call::AddSubkey { .. } => "set_str_subkey",
            Call::GetSubkeys { .. } => "get_str_subkeys",
        }
    }

    /// Key or queue prefix the call targets
    pub fn target(&self) -> &str {
        match self {
            Call::QueuePush { prefix, .. } | Call::QueuePop { prefix, .. } => prefix,
            Call::Get { key, .. }
            | Call::Set { key, .. }
            | Call::Remove { key, .. }
            | Call::Rename { key, .. }
            | Call::AddSubkey { key, .. }
            | Call::GetSubkeys { key, .. } => key,
        }
    }
}

/// Data returned by a call besides the success flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    None,
    Value(String),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
}

impl Payload {
    pub fn into_value(self) -> Option<String> {
        match self {
            Payload::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            Payload::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_pairs(self) -> Option<Vec<(String, String)>> {
        match self {
            Payload::Pairs(v) => Some(v),
            _ => None,
        }
    }
}

/// Raw reply of a transport call, before codes are read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    pub payload: Payload,
}

impl Reply {
    pub fn new(success: bool, payload: Payload) -> Self {
        Self { success, payload }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// Reply plus the codes of the same call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub payload: Payload,
    pub codes: ResultCodes,
}

impl Outcome {
    pub fn new(reply: Reply, codes: ResultCodes) -> Self {
        Self {
            success: reply.success,
            payload: reply.payload,
            codes,
        }
    }
}
