//! Tests for key/value and subkey commands against the in-memory store
//!
//! These tests verify:
//! - Get / Set / Remove semantics and result codes
//! - Password gating and key expiration
//! - Rename with and without a parent
//! - Subkey registration and recursive removal

use kvqueue::command::{AddSubkey, CommandOptions, Get, GetSubkeys, Remove, Rename, Set};
use kvqueue::memory::{ManualClock, MemoryStore};
use kvqueue::session::{codes, SerializedSession};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_session() -> (ManualClock, SerializedSession<MemoryStore>) {
    let clock = ManualClock::new(50_000);
    let session = SerializedSession::new(MemoryStore::with_clock(clock.clone()));
    (clock, session)
}

fn set(session: &SerializedSession<MemoryStore>, key: &str, value: &str) {
    let result = Set::new(key, value).unwrap().execute(session).unwrap();
    assert!(result.is_success(), "set {} failed: {}", key, result);
}

fn get(session: &SerializedSession<MemoryStore>, key: &str) -> Option<String> {
    Get::new(key).unwrap().execute(session).unwrap().into_value()
}

fn subkeys(session: &SerializedSession<MemoryStore>, key: &str) -> Vec<String> {
    GetSubkeys::new(key)
        .unwrap()
        .execute(session)
        .unwrap()
        .into_value()
        .unwrap_or_default()
}

// =============================================================================
// Get / Set Tests
// =============================================================================

#[test]
fn test_set_get() {
    let (_clock, session) = setup_session();
    set(&session, "hello", "world");

    let result = Get::new("hello").unwrap().execute(&session).unwrap();

    assert!(result.is_success());
    assert_eq!(result.operation(), "GetCmd");
    assert_eq!(result.value().map(String::as_str), Some("world"));
}

#[test]
fn test_get_nonexistent_key() {
    let (_clock, session) = setup_session();

    let result = Get::new("missing").unwrap().execute(&session).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.value(), None);
    assert_eq!(result.detail_code(), codes::NOT_FOUND);
}

#[test]
fn test_overwrite() {
    let (_clock, session) = setup_session();
    set(&session, "k", "v1");
    set(&session, "k", "v2");

    assert_eq!(get(&session, "k").as_deref(), Some("v2"));
}

#[test]
fn test_set_empty_value() {
    let (_clock, session) = setup_session();
    set(&session, "k", "");

    assert_eq!(get(&session, "k").as_deref(), Some(""));
}

#[test]
fn test_password_protected_key() {
    let (_clock, session) = setup_session();
    let pw = CommandOptions::builder().password("pw").build();
    Set::with_options("k", "v", false, pw.clone())
        .unwrap()
        .execute(&session)
        .unwrap();

    let denied = Get::new("k").unwrap().execute(&session).unwrap();
    assert!(!denied.is_success());
    assert_eq!(denied.detail_code(), codes::ACCESS_DENIED);

    let overwrite = Set::new("k", "other").unwrap().execute(&session).unwrap();
    assert!(!overwrite.is_success());
    assert_eq!(overwrite.detail_code(), codes::ACCESS_DENIED);

    let ok = Get::with_options("k", pw).unwrap().execute(&session).unwrap();
    assert_eq!(ok.into_value().as_deref(), Some("v"));
}

#[test]
fn test_key_expiration() {
    let (clock, session) = setup_session();
    let ttl = CommandOptions::builder().expiration_secs(30).build();
    Set::with_options("k", "v", false, ttl)
        .unwrap()
        .execute(&session)
        .unwrap();

    clock.advance(29);
    assert_eq!(get(&session, "k").as_deref(), Some("v"));

    clock.advance(1);
    let result = Get::new("k").unwrap().execute(&session).unwrap();
    assert!(!result.is_success());
    assert_eq!(result.detail_code(), codes::NOT_FOUND);
    assert_eq!(session.transport().key_count(), 0);
}

#[test]
fn test_get_without_attr_check_ignores_expiry() {
    let (clock, session) = setup_session();
    let ttl = CommandOptions::builder().expiration_secs(1).build();
    Set::with_options("k", "stale", false, ttl)
        .unwrap()
        .execute(&session)
        .unwrap();
    clock.advance(10);

    let unchecked = CommandOptions::builder().check_parent_attrs(false).build();
    let result = Get::with_options("k", unchecked).unwrap().execute(&session).unwrap();

    assert!(result.is_success());
    assert_eq!(result.into_value().as_deref(), Some("stale"));
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove() {
    let (_clock, session) = setup_session();
    set(&session, "k", "v");

    let result = Remove::new("k").unwrap().execute(&session).unwrap();
    assert!(result.is_success());
    assert_eq!(result.value(), Some(&true));
    assert_eq!(get(&session, "k"), None);

    let again = Remove::new("k").unwrap().execute(&session).unwrap();
    assert!(!again.is_success());
    assert_eq!(again.detail_code(), codes::NOT_FOUND);
}

#[test]
fn test_remove_with_subkeys_is_recursive() {
    let (_clock, session) = setup_session();
    set(&session, "root", "r");
    AddSubkey::new("root", "child", "c").unwrap().execute(&session).unwrap();
    AddSubkey::new("child", "grandchild", "g").unwrap().execute(&session).unwrap();

    Remove::with_subkeys("root", true).unwrap().execute(&session).unwrap();

    assert_eq!(session.transport().key_count(), 0);
}

#[test]
fn test_remove_without_subkeys_keeps_them() {
    let (_clock, session) = setup_session();
    set(&session, "root", "r");
    AddSubkey::new("root", "child", "c").unwrap().execute(&session).unwrap();

    Remove::new("root").unwrap().execute(&session).unwrap();

    assert_eq!(get(&session, "child").as_deref(), Some("c"));
}

// =============================================================================
// Subkey Tests
// =============================================================================

#[test]
fn test_add_subkey_registers_once() {
    let (_clock, session) = setup_session();
    set(&session, "parent", "p");

    for value in ["1", "2"] {
        let result = AddSubkey::new("parent", "sub", value).unwrap().execute(&session).unwrap();
        assert!(result.is_success());
    }

    assert_eq!(subkeys(&session, "parent"), vec!["sub"]);
    assert_eq!(get(&session, "sub").as_deref(), Some("2"));
}

#[test]
fn test_add_subkey_missing_parent() {
    let (_clock, session) = setup_session();

    let result = AddSubkey::new("nope", "sub", "v").unwrap().execute(&session).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.detail_code(), codes::NOT_FOUND);
    assert!(!session.transport().contains_key("sub"));
}

#[test]
fn test_add_subkey_parent_attrs() {
    let (_clock, session) = setup_session();
    let pw = CommandOptions::builder().password("pw").build();
    Set::with_options("parent", "p", false, pw)
        .unwrap()
        .execute(&session)
        .unwrap();

    let checked = AddSubkey::new("parent", "sub", "v").unwrap().execute(&session).unwrap();
    assert!(!checked.is_success());
    assert_eq!(checked.detail_code(), codes::PARENT_ATTRS);

    let unchecked = CommandOptions::builder().check_parent_attrs(false).build();
    let result = AddSubkey::with_options("parent", "sub", "v", unchecked)
        .unwrap()
        .execute(&session)
        .unwrap();
    assert!(result.is_success());
}

#[test]
fn test_set_clear_subkeys() {
    let (_clock, session) = setup_session();
    set(&session, "parent", "p");
    AddSubkey::new("parent", "a", "1").unwrap().execute(&session).unwrap();

    set(&session, "parent", "p2");
    assert_eq!(subkeys(&session, "parent"), vec!["a"]);

    Set::with_options("parent", "p3", true, CommandOptions::default())
        .unwrap()
        .execute(&session)
        .unwrap();
    assert!(subkeys(&session, "parent").is_empty());
    assert!(session.transport().contains_key("a"));
}

// =============================================================================
// Rename Tests
// =============================================================================

#[test]
fn test_rename() {
    let (_clock, session) = setup_session();
    set(&session, "old", "v");

    let result = Rename::new("old", "new").unwrap().execute(&session).unwrap();

    assert!(result.is_success());
    assert_eq!(get(&session, "old"), None);
    assert_eq!(get(&session, "new").as_deref(), Some("v"));
}

#[test]
fn test_rename_onto_existing_key() {
    let (_clock, session) = setup_session();
    set(&session, "a", "1");
    set(&session, "b", "2");

    let result = Rename::new("a", "b").unwrap().execute(&session).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.detail_code(), codes::EXISTS);
    assert_eq!(get(&session, "a").as_deref(), Some("1"));
}

#[test]
fn test_rename_updates_parent() {
    let (_clock, session) = setup_session();
    set(&session, "parent", "p");
    AddSubkey::new("parent", "a", "1").unwrap().execute(&session).unwrap();
    AddSubkey::new("parent", "b", "2").unwrap().execute(&session).unwrap();

    Rename::with_options("a", "z", Some("parent"), CommandOptions::default())
        .unwrap()
        .execute(&session)
        .unwrap();

    assert_eq!(subkeys(&session, "parent"), vec!["z", "b"]);
}

#[test]
fn test_rename_sets_expiration() {
    let (clock, session) = setup_session();
    set(&session, "a", "1");
    let ttl = CommandOptions::builder().expiration_secs(5).build();

    Rename::with_options("a", "b", None::<String>, ttl)
        .unwrap()
        .execute(&session)
        .unwrap();
    clock.advance(6);

    assert_eq!(get(&session, "b"), None);
}
