use crate::schema;
use crate::store::DbStore;
use crate::util::DbError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// Process-wide handle to the document store.
///
/// Opened once at startup and shared by every request task. SQLite work runs
/// on tokio's blocking pool, one unit of work at a time. [`DbPool::close`]
/// releases the connection; later units of work see a closed store.
#[derive(Clone)]
pub struct DbPool {
    conn: Arc<Mutex<Option<Connection>>>,
    database: Arc<str>,
}

impl DbPool {
    pub fn open(url: &str, database: &str) -> Result<Self, DbError> {
        let conn = schema::open_and_migrate(url)?;
        tracing::info!(url, database, "document store opened");
        Ok(Self::from_connection(conn, database))
    }

    pub fn open_in_memory(database: &str) -> Result<Self, DbError> {
        Ok(Self::from_connection(schema::with_test_db()?, database))
    }

    pub fn from_connection(conn: Connection, database: &str) -> Self {
        Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            database: Arc::from(database),
        }
    }

    pub async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(DbStore<'_>) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DbError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let database = Arc::clone(&self.database);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(DbStore::new(guard.as_ref(), &database))
        })
        .await
        .map_err(|err| {
            E::from(DbError::Task {
                message: err.to_string(),
            })
        })?
    }

    pub fn is_closed(&self) -> bool {
        self.conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Closes the underlying connection. Closing twice is a no-op.
    pub fn close(&self) -> Result<(), DbError> {
        let taken = self
            .conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(conn) = taken {
            conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
            tracing::info!(database = %self.database, "document store closed");
        }
        Ok(())
    }
}

impl From<DbError> for ps_core::ScribeError {
    fn from(value: DbError) -> Self {
        ps_core::ScribeError::Internal {
            message: value.to_string(),
        }
    }
}
