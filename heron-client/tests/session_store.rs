// Session store persistence behavior

use heron_client::{Session, SessionEvent, SessionStore, UserInfo};
use shared::models::Role;
use tempfile::TempDir;

fn session(name: &str, role: Role) -> Session {
    Session {
        token: "tok-abc123".to_string(),
        user: UserInfo {
            id: "7".to_string(),
            name: name.to_string(),
            role,
        },
    }
}

#[test]
fn test_load_after_save_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    assert!(store.load().is_none());

    let s = session("Alice Wong", Role::Hr);
    store.save(&s).unwrap();
    assert_eq!(store.load().unwrap(), s);

    // A second save replaces the first.
    let s2 = session("Binh Tran", Role::Manager);
    store.save(&s2).unwrap();
    assert_eq!(store.load().unwrap(), s2);
}

#[test]
fn test_clear_removes_session_and_remembered_username() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    store.save(&session("Alice Wong", Role::Admin)).unwrap();
    store.remember_username("alice").unwrap();
    assert_eq!(store.remembered_username().unwrap(), "alice");

    store.clear();
    assert!(store.load().is_none());
    assert!(store.remembered_username().is_none());
}

#[test]
fn test_corrupt_session_is_purged_silently() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    store.save(&session("Alice Wong", Role::Admin)).unwrap();
    std::fs::write(dir.path().join("session.json"), "{not json").unwrap();

    // Degrades to logged out, no error; the broken file is gone.
    assert!(store.load().is_none());
    assert!(!dir.path().join("session.json").exists());
    assert!(store.load().is_none());
}

#[test]
fn test_partial_session_counts_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    // Token without a user violates the all-or-nothing invariant.
    std::fs::write(dir.path().join("session.json"), r#"{"token":"tok"}"#).unwrap();
    assert!(store.load().is_none());
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_save_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&session("Alice Wong", Role::Employee)).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_save_and_clear_broadcast_events() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let mut events = store.subscribe();

    store.save(&session("Alice Wong", Role::Hr)).unwrap();
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn);

    store.clear();
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
}
