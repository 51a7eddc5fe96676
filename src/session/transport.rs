//! Transport adapter
//!
//! Native cluster libraries keep the codes of the last call in a slot owned
//! by the connection. [`SerializedSession`] turns that shape into a
//! [`Session`] by holding one lock from handle lookup until both codes have
//! been read.

use std::fmt::Debug;

use parking_lot::Mutex;

use crate::error::Result;

use super::call::{Call, Outcome, Reply};
use super::codes::ResultCodes;
use super::Session;

/// Native-library shape of a cluster connection
pub trait Transport: Send + Sync {
    /// Opaque connection handle
    type Handle: Copy + Debug;

    /// Resolve the open handle. Fails with an I/O-class error when the
    /// connection is closed or was never established.
    fn handle(&self) -> Result<Self::Handle>;

    /// Run one operation and return the raw success flag and payload.
    /// Codes stay in the connection until read.
    fn invoke(&self, handle: Self::Handle, call: &Call<'_>) -> Reply;

    /// Primary code of the last call on `handle`
    fn last_primary_code(&self, handle: Self::Handle) -> i64;

    /// Detail code of the last call on `handle`
    fn last_detail_code(&self, handle: Self::Handle) -> i64;
}

/// A [`Session`] over a [`Transport`], one call at a time
pub struct SerializedSession<T: Transport> {
    transport: T,

    /// Held across invoke + code read
    gate: Mutex<()>,
}

impl<T: Transport> SerializedSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            gate: Mutex::new(()),
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Unwrap the underlying transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> Session for SerializedSession<T> {
    fn call(&self, call: &Call<'_>) -> Result<Outcome> {
        let _guard = self.gate.lock();

        let handle = self.transport.handle()?;

        tracing::trace!(
            op = call.native_name(),
            key = call.target(),
            ?handle,
            "invoking store call"
        );

        let reply = self.transport.invoke(handle, call);
        let codes = ResultCodes::new(
            self.transport.last_primary_code(handle),
            self.transport.last_detail_code(handle),
        );

        Ok(Outcome::new(reply, codes))
    }
}
