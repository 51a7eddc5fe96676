//! Shared test transports
//!
//! Included by test crates with `#[path = "../common/mod.rs"] mod common;`

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use kvqueue::command::QueueOrder;
use kvqueue::session::{Call, Payload, Reply, ResultCodes, Transport};
use kvqueue::{KvqError, Result};
use parking_lot::Mutex;

// =============================================================================
// Recorded Calls
// =============================================================================

/// Owned copy of the fields of a [`Call`] that tests assert on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenCall {
    pub op: &'static str,
    pub target: String,
    pub value: Option<String>,
    pub order: Option<QueueOrder>,
    pub check_parent_attrs: Option<bool>,
    pub password: Option<String>,
    pub ttl: Option<Duration>,
}

impl SeenCall {
    pub fn from_call(call: &Call<'_>) -> Self {
        let mut seen = SeenCall {
            op: call.native_name(),
            target: call.target().to_string(),
            value: None,
            order: None,
            check_parent_attrs: None,
            password: None,
            ttl: None,
        };

        match *call {
            Call::QueuePush {
                value,
                order,
                check_parent_attrs,
                password,
                ttl,
                ..
            } => {
                seen.value = Some(value.to_string());
                seen.order = Some(order);
                seen.check_parent_attrs = Some(check_parent_attrs);
                seen.password = password.map(str::to_string);
                seen.ttl = ttl;
            }
            Call::QueuePop {
                order,
                check_parent_attrs,
                password,
                ..
            } => {
                seen.order = Some(order);
                seen.check_parent_attrs = Some(check_parent_attrs);
                seen.password = password.map(str::to_string);
            }
            Call::Get {
                check_attrs,
                password,
                ..
            }
            | Call::GetSubkeys {
                check_attrs,
                password,
                ..
            } => {
                seen.check_parent_attrs = Some(check_attrs);
                seen.password = password.map(str::to_string);
            }
            Call::Set {
                value,
                password,
                ttl,
                ..
            } => {
                seen.value = Some(value.to_string());
                seen.password = password.map(str::to_string);
                seen.ttl = ttl;
            }
            Call::Remove { .. } => {}
            Call::Rename {
                check_parent_attrs,
                password,
                ttl,
                ..
            } => {
                seen.check_parent_attrs = Some(check_parent_attrs);
                seen.password = password.map(str::to_string);
                seen.ttl = ttl;
            }
            Call::AddSubkey {
                value,
                check_parent_attrs,
                password,
                ttl,
                ..
            } => {
                seen.value = Some(value.to_string());
                seen.check_parent_attrs = Some(check_parent_attrs);
                seen.password = password.map(str::to_string);
                seen.ttl = ttl;
            }
        }
        seen
    }
}

// =============================================================================
// ScriptedTransport
// =============================================================================

/// Transport that records every call and answers from a script
///
/// Unscripted calls succeed with codes (0, 0) and no payload.
pub struct ScriptedTransport {
    calls: Mutex<Vec<SeenCall>>,
    script: Mutex<VecDeque<(Reply, ResultCodes)>>,
    last: Mutex<ResultCodes>,
    connected: AtomicBool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(ResultCodes::default()),
            connected: AtomicBool::new(true),
        }
    }

    /// Queue the answer for the next unanswered call
    pub fn respond(self, success: bool, payload: Payload, codes: ResultCodes) -> Self {
        self.script
            .lock()
            .push_back((Reply::new(success, payload), codes));
        self
    }

    pub fn disconnected() -> Self {
        let transport = Self::new();
        transport.connected.store(false, Ordering::SeqCst);
        transport
    }

    pub fn calls(&self) -> Vec<SeenCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Transport for ScriptedTransport {
    type Handle = u32;

    fn handle(&self) -> Result<u32> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(7)
        } else {
            Err(KvqError::NotConnected("scripted transport is down".to_string()))
        }
    }

    fn invoke(&self, _handle: u32, call: &Call<'_>) -> Reply {
        self.calls.lock().push(SeenCall::from_call(call));

        let (reply, codes) = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| (Reply::new(true, Payload::None), ResultCodes::ok()));
        *self.last.lock() = codes;
        reply
    }

    fn last_primary_code(&self, _handle: u32) -> i64 {
        self.last.lock().primary
    }

    fn last_detail_code(&self, _handle: u32) -> i64 {
        self.last.lock().detail
    }
}

// =============================================================================
// EchoTransport
// =============================================================================

/// Transport whose detail code is the numeric value of the pushed element
///
/// Stores the codes, then yields before returning, so an unserialized caller
/// reading the slot late would see another call's codes.
pub struct EchoTransport {
    last: Mutex<ResultCodes>,
}

impl EchoTransport {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(ResultCodes::default()),
        }
    }
}

impl Transport for EchoTransport {
    type Handle = ();

    fn handle(&self) -> Result<()> {
        Ok(())
    }

    fn invoke(&self, _handle: (), call: &Call<'_>) -> Reply {
        let id = match *call {
            Call::QueuePush { value, .. } => value.parse::<i64>().unwrap_or(-1),
            _ => -1,
        };
        *self.last.lock() = ResultCodes::new(1, id);
        thread::sleep(Duration::from_micros(200));
        thread::yield_now();
        Reply::new(false, Payload::None)
    }

    fn last_primary_code(&self, _handle: ()) -> i64 {
        self.last.lock().primary
    }

    fn last_detail_code(&self, _handle: ()) -> i64 {
        self.last.lock().detail
    }
}
