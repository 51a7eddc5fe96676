//! In-memory store
//!
//! Applies [`Call`]s to a local copy of the cluster's data model and keeps
//! the codes of the last call the way the native library does.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::command::QueueOrder;
use crate::error::{KvqError, Result};
use crate::session::codes::{self, ResultCodes};
use crate::session::{Call, Payload, Reply, Transport};

use super::clock::{Clock, SystemClock};
use super::{snapshot, Attrs};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Outcome of applying a call: payload, or the detail code of the rejection
type Step = std::result::Result<Payload, i64>;

// =============================================================================
// Data Model
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoreState {
    pub keys: BTreeMap<String, KeyEntry>,
    pub queues: BTreeMap<String, QueueEntry>,
    pub key_queues: BTreeMap<String, QueueEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct KeyEntry {
    pub value: String,
    pub subkeys: Vec<String>,
    pub attrs: Attrs,
}

/// Queue marker attributes plus elements, oldest at the front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct QueueEntry {
    pub attrs: Attrs,
    pub items: VecDeque<QueueItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct QueueItem {
    pub key: Option<String>,
    pub value: String,
    pub attrs: Attrs,
}

fn deadline(now: u64, ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|d| now.saturating_add(d.as_secs().max(1)))
}

impl StoreState {
    fn live_key(&self, key: &str, now: u64) -> Option<&KeyEntry> {
        self.keys.get(key).filter(|e| !e.attrs.is_expired(now))
    }

    fn get(&self, key: &str, check_attrs: bool, password: Option<&str>, now: u64) -> Step {
        let entry = self.keys.get(key).ok_or(codes::NOT_FOUND)?;
        if check_attrs && entry.attrs.is_expired(now) {
            return Err(codes::NOT_FOUND);
        }
        if !entry.attrs.unlocks(password) {
            return Err(codes::ACCESS_DENIED);
        }
        Ok(Payload::Value(entry.value.clone()))
    }

    fn get_subkeys(&self, key: &str, check_attrs: bool, password: Option<&str>, now: u64) -> Step {
        let entry = self.keys.get(key).ok_or(codes::NOT_FOUND)?;
        if check_attrs && entry.attrs.is_expired(now) {
            return Err(codes::NOT_FOUND);
        }
        if !entry.attrs.unlocks(password) {
            return Err(codes::ACCESS_DENIED);
        }
        Ok(Payload::List(entry.subkeys.clone()))
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
        clear_subkeys: bool,
        password: Option<&str>,
        ttl: Option<Duration>,
        now: u64,
    ) -> Step {
        let attrs = Attrs::new(password, deadline(now, ttl));

        match self.keys.get_mut(key) {
            Some(entry) if !entry.attrs.is_expired(now) => {
                if !entry.attrs.unlocks(password) {
                    return Err(codes::ACCESS_DENIED);
                }
                entry.value = value.to_string();
                entry.attrs = attrs;
                if clear_subkeys {
                    entry.subkeys.clear();
                }
            }
            _ => {
                self.keys.insert(
                    key.to_string(),
                    KeyEntry {
                        value: value.to_string(),
                        subkeys: Vec::new(),
                        attrs,
                    },
                );
            }
        }
        Ok(Payload::None)
    }

    fn remove(&mut self, key: &str, with_subkeys: bool, now: u64) -> Step {
        // An expired entry is purged here too
        let entry = match self.keys.remove(key) {
            Some(e) if !e.attrs.is_expired(now) => e,
            _ => return Err(codes::NOT_FOUND),
        };

        if with_subkeys {
            let mut pending = entry.subkeys;
            while let Some(child) = pending.pop() {
                if let Some(removed) = self.keys.remove(&child) {
                    pending.extend(removed.subkeys);
                }
            }
        }
        Ok(Payload::None)
    }

    #[allow(clippy::too_many_arguments)]
    fn rename(
        &mut self,
        key: &str,
        new_key: &str,
        parent: Option<&str>,
        check_parent_attrs: bool,
        password: Option<&str>,
        ttl: Option<Duration>,
        now: u64,
    ) -> Step {
        let source = self.live_key(key, now).ok_or(codes::NOT_FOUND)?;
        if !source.attrs.unlocks(password) {
            return Err(codes::ACCESS_DENIED);
        }
        if self.live_key(new_key, now).is_some() {
            return Err(codes::EXISTS);
        }
        if let Some(parent) = parent {
            let parent_entry = self.keys.get(parent).ok_or(codes::NOT_FOUND)?;
            if check_parent_attrs && !parent_entry.attrs.admits(password, now) {
                return Err(codes::PARENT_ATTRS);
            }
        }

        let mut entry = self.keys.remove(key).ok_or(codes::NOT_FOUND)?;
        if let Some(at) = deadline(now, ttl) {
            entry.attrs.expires_at = Some(at);
        }
        self.keys.insert(new_key.to_string(), entry);

        if let Some(parent_entry) = parent.and_then(|p| self.keys.get_mut(p)) {
            for name in parent_entry.subkeys.iter_mut().filter(|name| name.as_str() == key) {
                *name = new_key.to_string();
            }
        }
        Ok(Payload::None)
    }

    #[allow(clippy::too_many_arguments)]
    fn add_subkey(
        &mut self,
        key: &str,
        subkey: &str,
        value: &str,
        check_parent_attrs: bool,
        password: Option<&str>,
        ttl: Option<Duration>,
        now: u64,
    ) -> Step {
        let parent = self.keys.get(key).ok_or(codes::NOT_FOUND)?;
        if check_parent_attrs && !parent.attrs.admits(password, now) {
            return Err(codes::PARENT_ATTRS);
        }

        self.set(subkey, value, false, password, ttl, now)?;

        if let Some(parent) = self.keys.get_mut(key) {
            if !parent.subkeys.iter().any(|s| s == subkey) {
                parent.subkeys.push(subkey.to_string());
            }
        }
        Ok(Payload::None)
    }

    #[allow(clippy::too_many_arguments)]
    fn queue_push(
        &mut self,
        prefix: &str,
        key: Option<&str>,
        value: &str,
        check_parent_attrs: bool,
        password: Option<&str>,
        ttl: Option<Duration>,
        now: u64,
    ) -> Step {
        let queues = if key.is_some() { &self.key_queues } else { &self.queues };
        if let Some(queue) = queues.get(prefix) {
            if check_parent_attrs && !queue.attrs.admits(password, now) {
                return Err(codes::PARENT_ATTRS);
            }
        }

        // Keyed elements are also stored as keys
        if let Some(key) = key {
            self.set(key, value, false, password, ttl, now)?;
        }

        let queues = if key.is_some() {
            &mut self.key_queues
        } else {
            &mut self.queues
        };
        let queue = queues.entry(prefix.to_string()).or_insert_with(|| QueueEntry {
            attrs: Attrs::new(password, None),
            items: VecDeque::new(),
        });
        queue.items.push_back(QueueItem {
            key: key.map(str::to_string),
            value: value.to_string(),
            attrs: Attrs::new(password, deadline(now, ttl)),
        });
        Ok(Payload::None)
    }

    #[allow(clippy::too_many_arguments)]
    fn queue_pop(
        &mut self,
        prefix: &str,
        count: u32,
        with_keys: bool,
        order: QueueOrder,
        check_parent_attrs: bool,
        password: Option<&str>,
        now: u64,
    ) -> Step {
        let queues = if with_keys {
            &mut self.key_queues
        } else {
            &mut self.queues
        };
        let queue = queues.get_mut(prefix).ok_or(codes::NOT_FOUND)?;
        if check_parent_attrs && !queue.attrs.admits(password, now) {
            return Err(codes::PARENT_ATTRS);
        }

        queue.items.retain(|item| !item.attrs.is_expired(now));

        let mut popped = Vec::new();
        while popped.len() < count as usize {
            let next = match order {
                QueueOrder::Fifo => queue.items.front(),
                QueueOrder::Lifo => queue.items.back(),
            };
            let Some(item) = next else { break };
            if !item.attrs.unlocks(password) {
                if popped.is_empty() {
                    return Err(codes::ACCESS_DENIED);
                }
                break;
            }
            let taken = match order {
                QueueOrder::Fifo => queue.items.pop_front(),
                QueueOrder::Lifo => queue.items.pop_back(),
            };
            popped.extend(taken);
        }

        if popped.is_empty() {
            return Err(codes::NOT_FOUND);
        }

        if with_keys {
            let mut pairs = Vec::with_capacity(popped.len());
            for item in popped {
                let key = item.key.unwrap_or_default();
                // A later push may have rebound the key; leave that binding alone
                if self.keys.get(&key).is_some_and(|e| e.value == item.value) {
                    self.keys.remove(&key);
                }
                pairs.push((key, item.value));
            }
            Ok(Payload::Pairs(pairs))
        } else {
            Ok(Payload::List(popped.into_iter().map(|item| item.value).collect()))
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process cluster stand-in
///
/// One store is one connection: it has a single handle, and [`close`] makes
/// further calls fail with [`KvqError::NotConnected`].
///
/// [`close`]: MemoryStore::close
pub struct MemoryStore {
    state: RwLock<StoreState>,

    /// Codes of the last call, as the native library keeps them
    last: Mutex<ResultCodes>,

    handle: u64,
    open: AtomicBool,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store on the given clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::from_state(StoreState::default(), Arc::new(clock))
    }

    /// Restore a store from a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_clock(path, SystemClock)
    }

    pub fn load_with_clock(path: &Path, clock: impl Clock + 'static) -> Result<Self> {
        let state = snapshot::read(path)?;
        tracing::debug!(
            path = %path.display(),
            keys = state.keys.len(),
            queues = state.queues.len() + state.key_queues.len(),
            "loaded memory store snapshot"
        );
        Ok(Self::from_state(state, Arc::new(clock)))
    }

    fn from_state(state: StoreState, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(state),
            last: Mutex::new(ResultCodes::ok()),
            handle: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            open: AtomicBool::new(true),
            clock,
        }
    }

    /// Write the current contents to a snapshot file
    pub fn save(&self, path: &Path) -> Result<()> {
        let state = self.state.read();
        snapshot::write(path, &state)?;
        tracing::debug!(path = %path.display(), "saved memory store snapshot");
        Ok(())
    }

    /// Drop the connection; the data stays readable through [`save`](Self::save)
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of unexpired keys
    pub fn key_count(&self) -> usize {
        let now = self.clock.now_secs();
        self.state
            .read()
            .keys
            .values()
            .filter(|e| !e.attrs.is_expired(now))
            .count()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_secs();
        self.state.read().live_key(key, now).is_some()
    }

    /// Unexpired elements in a plain queue
    pub fn queue_len(&self, prefix: &str) -> usize {
        Self::live_items(&self.state.read().queues, prefix, self.clock.now_secs())
    }

    /// Unexpired elements in a keyed queue
    pub fn key_queue_len(&self, prefix: &str) -> usize {
        Self::live_items(&self.state.read().key_queues, prefix, self.clock.now_secs())
    }

    fn live_items(queues: &BTreeMap<String, QueueEntry>, prefix: &str, now: u64) -> usize {
        queues
            .get(prefix)
            .map(|q| q.items.iter().filter(|i| !i.attrs.is_expired(now)).count())
            .unwrap_or(0)
    }

    fn apply(&self, call: &Call<'_>) -> Step {
        let now = self.clock.now_secs();

        match *call {
            Call::Get {
                key,
                check_attrs,
                password,
            } => self.state.read().get(key, check_attrs, password, now),
            Call::GetSubkeys {
                key,
                check_attrs,
                password,
            } => self.state.read().get_subkeys(key, check_attrs, password, now),
            Call::Set {
                key,
                value,
                clear_subkeys,
                password,
                ttl,
            } => self
                .state
                .write()
                .set(key, value, clear_subkeys, password, ttl, now),
            Call::Remove { key, with_subkeys } => self.state.write().remove(key, with_subkeys, now),
            Call::Rename {
                key,
                new_key,
                parent,
                check_parent_attrs,
                password,
                ttl,
            } => self.state.write().rename(
                key,
                new_key,
                parent,
                check_parent_attrs,
                password,
                ttl,
                now,
            ),
            Call::AddSubkey {
                key,
                subkey,
                value,
                check_parent_attrs,
                password,
                ttl,
            } => self.state.write().add_subkey(
                key,
                subkey,
                value,
                check_parent_attrs,
                password,
                ttl,
                now,
            ),
            // Elements always join at the back; the order flag matters on pop
            Call::QueuePush {
                prefix,
                key,
                value,
                order: _,
                check_parent_attrs,
                password,
                ttl,
            } => self.state.write().queue_push(
                prefix,
                key,
                value,
                check_parent_attrs,
                password,
                ttl,
                now,
            ),
            Call::QueuePop {
                prefix,
                count,
                with_keys,
                order,
                check_parent_attrs,
                password,
            } => self.state.write().queue_pop(
                prefix,
                count,
                with_keys,
                order,
                check_parent_attrs,
                password,
                now,
            ),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryStore {
    type Handle = u64;

    fn handle(&self) -> Result<u64> {
        if self.is_open() {
            Ok(self.handle)
        } else {
            Err(KvqError::NotConnected(format!(
                "memory store handle {} is closed",
                self.handle
            )))
        }
    }

    fn invoke(&self, handle: u64, call: &Call<'_>) -> Reply {
        if handle != self.handle || !self.is_open() {
            *self.last.lock() = ResultCodes::error(codes::NOT_CONNECTED);
            return Reply::failed();
        }

        let (reply, result_codes) = match self.apply(call) {
            Ok(payload) => (Reply::new(true, payload), ResultCodes::ok()),
            Err(detail) => (Reply::failed(), ResultCodes::error(detail)),
        };
        *self.last.lock() = result_codes;
        reply
    }

    fn last_primary_code(&self, _handle: u64) -> i64 {
        self.last.lock().primary
    }

    fn last_detail_code(&self, _handle: u64) -> i64 {
        self.last.lock().detail
    }
}
