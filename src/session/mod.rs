//! Session Module
//!
//! The boundary between commands and the cluster.
//!
//! ## Shape
//! ```text
//!   Command ──Call──▶ Session::call ──▶ Outcome { success, payload, codes }
//!                          │
//!            SerializedSession<T: Transport>
//!                          │  lock ─ handle ─ invoke ─ last codes ─ unlock
//!                          ▼
//!                   Transport (native library shape)
//! ```
//!
//! Commands only ever see [`Session`]. A session returns the result codes
//! together with the call that produced them, so two commands can never
//! observe each other's codes.

mod call;
pub mod codes;
mod transport;

use std::sync::Arc;

use crate::error::Result;

pub use call::{Call, Outcome, Payload, Reply};
pub use codes::ResultCodes;
pub use transport::{SerializedSession, Transport};

/// An established connection to the cluster
///
/// Implementations must return codes that belong to exactly the call made.
pub trait Session: Send + Sync {
    /// Perform one store operation
    ///
    /// Errors are reserved for an unusable session (closed, no handle).
    /// A store that rejects the operation returns `Ok` with
    /// `success == false`.
    fn call(&self, call: &Call<'_>) -> Result<Outcome>;
}

impl<S: Session + ?Sized> Session for &S {
    fn call(&self, call: &Call<'_>) -> Result<Outcome> {
        (**self).call(call)
    }
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn call(&self, call: &Call<'_>) -> Result<Outcome> {
        (**self).call(call)
    }
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn call(&self, call: &Call<'_>) -> Result<Outcome> {
        (**self).call(call)
    }
}
