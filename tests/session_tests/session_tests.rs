//! Tests for SerializedSession
//!
//! These tests verify:
//! - Codes are read for exactly the call that produced them
//! - Concurrent executes on one session never swap codes
//! - Independent sessions run concurrently
//! - Closed sessions fail before any store access

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::{EchoTransport, ScriptedTransport};
use kvqueue::command::{QueueAdd, QueueRemove};
use kvqueue::memory::MemoryStore;
use kvqueue::session::{codes, Call, Payload, ResultCodes, SerializedSession, Session};
use kvqueue::KvqError;

// =============================================================================
// Code Capture Tests
// =============================================================================

#[test]
fn test_outcome_carries_codes_of_its_call() {
    let transport = ScriptedTransport::new()
        .respond(true, Payload::None, ResultCodes::new(0, 0))
        .respond(false, Payload::None, ResultCodes::new(1, codes::EXISTS));
    let session = SerializedSession::new(transport);

    let call = Call::Remove {
        key: "k",
        with_subkeys: false,
    };
    let first = session.call(&call).unwrap();
    let second = session.call(&call).unwrap();

    assert!(first.success);
    assert_eq!(first.codes, ResultCodes::ok());
    assert!(!second.success);
    assert_eq!(second.codes, ResultCodes::new(1, codes::EXISTS));
}

#[test]
fn test_concurrent_executes_never_swap_codes() {
    let session = SerializedSession::new(EchoTransport::new());

    crossbeam::scope(|s| {
        for t in 0..8i64 {
            let session = &session;
            s.spawn(move |_| {
                for i in 0..50i64 {
                    let id = t * 1000 + i;
                    let result = QueueAdd::new("q", id.to_string())
                        .unwrap()
                        .execute(session)
                        .unwrap();
                    assert!(!result.is_success());
                    assert_eq!(result.detail_code(), id);
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_independent_sessions_run_concurrently() {
    let sessions: Vec<_> = (0..4)
        .map(|_| SerializedSession::new(MemoryStore::new()))
        .collect();

    crossbeam::scope(|s| {
        for (n, session) in sessions.iter().enumerate() {
            s.spawn(move |_| {
                for i in 0..100 {
                    QueueAdd::new("q", format!("{}-{}", n, i))
                        .unwrap()
                        .execute(session)
                        .unwrap();
                }
            });
        }
    })
    .unwrap();

    for session in &sessions {
        assert_eq!(session.transport().queue_len("q"), 100);
    }
}

#[test]
fn test_shared_memory_session_across_threads() {
    let session = Arc::new(SerializedSession::new(MemoryStore::new()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                for i in 0..25 {
                    let result = QueueAdd::new("q", format!("{}:{}", t, i))
                        .unwrap()
                        .execute(&session)
                        .unwrap();
                    assert!(result.is_success());
                    assert_eq!(result.codes(), ResultCodes::ok());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(session.transport().queue_len("q"), 100);
}

// =============================================================================
// Connection State Tests
// =============================================================================

#[test]
fn test_closed_store_is_not_connected() {
    let session = SerializedSession::new(MemoryStore::new());
    QueueAdd::new("q", "e").unwrap().execute(&session).unwrap();

    session.transport().close();

    let err = QueueRemove::new("q").unwrap().execute(&session).unwrap_err();
    assert!(matches!(err, KvqError::NotConnected(_)));
    assert!(err.is_io());
    assert_eq!(session.transport().queue_len("q"), 1);
}

#[test]
fn test_dyn_session() {
    let session: Box<dyn Session> = Box::new(SerializedSession::new(MemoryStore::new()));

    let result = QueueAdd::new("q", "e").unwrap().execute(&session).unwrap();
    assert!(result.is_success());

    let popped = QueueRemove::new("q").unwrap().execute(session.as_ref()).unwrap();
    assert_eq!(popped.into_value().unwrap(), vec!["e"]);
}
