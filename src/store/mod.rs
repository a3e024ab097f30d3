//! Local persistence

use std::fs;

use tracing::{info, warn};

use crate::config::Config;

mod kv;
mod session;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use session::{SessionManager, TOKEN_KEY, USER_KEY};

/// Open the session store, falling back to memory when the database is unusable
pub fn open_session_store(config: &Config) -> Box<dyn KeyValueStore> {
    if config.session.ephemeral {
        info!("session store: memory");
        return Box::new(MemoryStore::new());
    }
    let Some(path) = config.session_db_path() else {
        warn!("no data directory; session store: memory");
        return Box::new(MemoryStore::new());
    };
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(dir = %parent.display(), error = %err, "cannot create session db directory");
        }
    }
    match SqliteStore::open(&path) {
        Ok(store) => {
            info!(path = %path.display(), "session store: sqlite");
            Box::new(store)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{err:#}"), "session db unavailable, using memory");
            Box::new(MemoryStore::new())
        }
    }
}
