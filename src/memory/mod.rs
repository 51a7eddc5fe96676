//! Memory Module
//!
//! An in-process cluster stand-in implementing [`Transport`].
//!
//! ## Responsibilities
//! - Keys with values, subkey lists and attributes (password, expiry)
//! - Plain and keyed queues, each with a marker holding the queue attributes
//! - Native-style "last result codes" slot per connection
//! - Snapshot to / restore from a checksummed file
//!
//! ## Data Structure Choice
//! BTreeMap + VecDeque behind one parking_lot RwLock. Reads take the read
//! lock; anything that mutates (including lazy expiry purges) takes the
//! write lock.
//!
//! [`Transport`]: crate::session::Transport

mod clock;
mod snapshot;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use snapshot::{HEADER_SIZE, MAGIC, VERSION};
pub use store::MemoryStore;

use serde::{Deserialize, Serialize};

/// Password and expiry carried by keys, queue markers and queue elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Attrs {
    pub password: Option<String>,
    /// Unix seconds
    pub expires_at: Option<u64>,
}

impl Attrs {
    pub fn new(password: Option<&str>, expires_at: Option<u64>) -> Self {
        Self {
            password: password.map(str::to_string),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at.map_or(false, |at| now >= at)
    }

    /// An unprotected entry opens with any credential; a protected one only
    /// with its own password.
    pub fn unlocks(&self, password: Option<&str>) -> bool {
        match &self.password {
            None => true,
            Some(expected) => password == Some(expected.as_str()),
        }
    }

    /// Parent-attribute check: not expired and unlocked
    pub fn admits(&self, password: Option<&str>, now: u64) -> bool {
        !self.is_expired(now) && self.unlocks(password)
    }
}
