use std::{path::Path, sync::Mutex};

use rusqlite::{Connection, ErrorCode, params};
use tracing::debug;

use crate::{error::WaitlistError, waitlist::signup::Signup};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS waitlist (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    platform TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insert {
    Added,
    Duplicate,
}

pub trait WaitlistStore: Send + Sync {
    /// Adds the signup, or reports that its email is already listed.
    ///
    /// # Errors
    /// If the underlying storage fails.
    fn insert(&self, signup: &Signup) -> Result<Insert, WaitlistError>;

    /// # Errors
    /// If the underlying storage fails.
    fn count(&self) -> Result<usize, WaitlistError>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// # Errors
    /// If the database cannot be opened or the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WaitlistError> {
        debug!(path = %path.as_ref().display(), "opening waitlist database");
        Self::init(Connection::open(path)?)
    }

    /// # Errors
    /// If the table cannot be created.
    pub fn in_memory() -> Result<Self, WaitlistError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, WaitlistError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}

impl WaitlistStore for SqliteStore {
    fn insert(&self, signup: &Signup) -> Result<Insert, WaitlistError> {
        let conn = self.conn.lock().map_err(|_| WaitlistError::Poisoned)?;
        let inserted = conn.execute(
            "INSERT INTO waitlist (first_name, email, platform) VALUES (?1, ?2, ?3)",
            params![signup.first_name, signup.email, signup.platform],
        );

        match inserted {
            Ok(_) => Ok(Insert::Added),
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
                Ok(Insert::Duplicate)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn count(&self) -> Result<usize, WaitlistError> {
        let conn = self.conn.lock().map_err(|_| WaitlistError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM waitlist", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str) -> Signup {
        Signup {
            first_name: "Sam".into(),
            email: email.into(),
            platform: "ios".into(),
        }
    }

    #[test]
    fn second_insert_of_an_email_is_a_duplicate() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.insert(&signup("sam@example.com")).unwrap(), Insert::Added);
        assert_eq!(store.insert(&signup("sam@example.com")).unwrap(), Insert::Duplicate);
        assert_eq!(store.insert(&signup("kai@example.com")).unwrap(), Insert::Added);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waitlist.db");

        SqliteStore::open(&path).unwrap().insert(&signup("sam@example.com")).unwrap();
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.insert(&signup("sam@example.com")).unwrap(), Insert::Duplicate);
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn missing_table_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waitlist.db");
        let store = SqliteStore::open(&path).unwrap();
        Connection::open(&path).unwrap().execute_batch("DROP TABLE waitlist").unwrap();

        let err = store.insert(&signup("sam@example.com")).unwrap_err();
        assert!(matches!(err, WaitlistError::Storage(_)), "{err:?}");
        assert!(matches!(store.count(), Err(WaitlistError::Storage(_))));
    }
}
