//! # kvqueue
//!
//! Client-side command layer for a distributed key-value cluster that also
//! offers queues (push/pop over keys sharing a prefix):
//! - Immutable, validated commands (queue add/remove, get/set, subkeys, ...)
//! - One store call per `execute`, outcome normalized into `CommandResult`
//! - Store rejections are data; only bad arguments and dead sessions are errors
//! - An in-memory store for running without a cluster
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Command (QueueAdd, QueueRemove, ...)            │
//! │                validated once, executed N times              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Call
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session::call                          │
//! │           Outcome { success, payload, result codes }         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │             SerializedSession<T: Transport>                  │
//! │        lock ─ handle ─ invoke ─ read codes ─ unlock          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Native    │          │ MemoryStore │
//!   │   cluster   │          │ (snapshot)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod command;
pub mod session;
pub mod memory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvqError, Result};
pub use config::Config;
pub use command::{
    Command, CommandOptions, CommandResult, QueueAdd, QueueOrder, QueueRemove, Request,
};
pub use session::{SerializedSession, Session, Transport};
pub use memory::MemoryStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvqueue
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
