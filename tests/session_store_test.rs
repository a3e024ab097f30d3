//! Session persistence across restarts, backed by a SQLite file

use std::path::PathBuf;
use std::sync::Arc;

use gatehouse::domain::access::{AuthError, Role};
use gatehouse::infrastructure::{ManualClock, MockProvider};
use gatehouse::store::{KeyValueStore, SessionManager, SqliteStore, TOKEN_KEY, USER_KEY};

struct TempDb(PathBuf);

impl TempDb {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "gatehouse-{}-{}.sqlite3",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    fn manager(&self) -> SessionManager {
        let store = SqliteStore::open(&self.0).expect("open session db");
        SessionManager::new(
            Box::new(store),
            Arc::new(MockProvider::new()),
            Arc::new(ManualClock::new(1_700_000_000_000)),
        )
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[tokio::test]
async fn test_session_survives_restart() {
    let db = TempDb::new("restart");

    let mut first = db.manager();
    assert!(first.restore_session().is_none());
    let session = first.login("admin", "admin123").await.unwrap();
    assert_eq!(session.user.role, Role::Admin);
    drop(first);

    let mut second = db.manager();
    let restored = second.restore_session().expect("session restored");
    assert_eq!(restored.user, session.user);
    assert_eq!(restored.token, session.token);
}

#[tokio::test]
async fn test_logout_survives_restart() {
    let db = TempDb::new("logout");

    let mut first = db.manager();
    first.login("admin", "admin123").await.unwrap();
    first.logout();
    let store = first.into_store();
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    drop(store);

    let mut second = db.manager();
    assert!(second.restore_session().is_none());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_session() {
    let db = TempDb::new("failed");

    let mut manager = db.manager();
    let session = manager.login("admin", "admin123").await.unwrap();
    let err = manager.login("admin", "guess").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(manager.current(), Some(&session));

    let mut reopened = db.manager();
    assert_eq!(reopened.restore_session(), Some(session));
}
