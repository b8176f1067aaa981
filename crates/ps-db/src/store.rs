use ps_core::error::HealthError;
use ps_core::store::Store;
use rusqlite::Connection;

use crate::conversation_repo::ConversationRepo;
use crate::status_check_repo::StatusCheckRepo;

/// A borrowed view of the store for one unit of work. `conn` is `None` once
/// the owning pool has been closed.
#[derive(Clone, Copy)]
pub struct DbStore<'a> {
    conn: Option<&'a Connection>,
    database: &'a str,
}

impl<'a> DbStore<'a> {
    pub fn new(conn: Option<&'a Connection>, database: &'a str) -> Self {
        Self { conn, database }
    }
}

impl Store for DbStore<'_> {
    type StatusChecks<'a>
        = StatusCheckRepo<'a>
    where
        Self: 'a;
    type Conversations<'a>
        = ConversationRepo<'a>
    where
        Self: 'a;

    fn status_checks(&self) -> Self::StatusChecks<'_> {
        StatusCheckRepo::new(self.conn, self.database)
    }

    fn conversations(&self) -> Self::Conversations<'_> {
        ConversationRepo::new(self.conn, self.database)
    }

    fn ping(&self) -> Result<(), HealthError> {
        let Some(conn) = self.conn else {
            return Err(HealthError::Unavailable {
                message: "store is closed".to_string(),
            });
        };
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|err| HealthError::Unavailable {
                message: err.to_string(),
            })
    }
}
