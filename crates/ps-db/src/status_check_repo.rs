use crate::util::{DbError, decode_json, encode_json, to_rfc3339};
use ps_core::error::StatusCheckError;
use ps_core::status_checks::StatusCheckRepository;
use ps_core::types::{StatusCheck, StatusCheckId};
use rusqlite::Connection;

pub(crate) const COLLECTION: &str = "status_checks";

pub struct StatusCheckRepo<'a> {
    conn: Option<&'a Connection>,
    database: &'a str,
}

impl<'a> StatusCheckRepo<'a> {
    pub fn new(conn: Option<&'a Connection>, database: &'a str) -> Self {
        Self { conn, database }
    }

    fn conn(&self) -> Result<&'a Connection, StatusCheckError> {
        self.conn.ok_or_else(|| persistence(DbError::Closed))
    }
}

impl StatusCheckRepository for StatusCheckRepo<'_> {
    fn create(&self, client_name: String) -> Result<StatusCheck, StatusCheckError> {
        let check = StatusCheck {
            id: StatusCheckId::generate(),
            client_name,
            created_at: chrono::Utc::now(),
        };
        let body = encode_json(&check).map_err(persistence)?;
        let sql = "INSERT INTO documents (db_name, collection, id, body, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
        let params = (
            self.database,
            COLLECTION,
            check.id.as_str(),
            body,
            to_rfc3339(&check.created_at),
        );
        self.conn()?
            .execute(sql, params)
            .map_err(|err| persistence(err.into()))?;
        Ok(check)
    }

    fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, StatusCheckError> {
        let mut stmt = self
            .conn()?
            .prepare("SELECT body FROM documents WHERE db_name = ?1 AND collection = ?2 ORDER BY rowid ASC LIMIT ?3")
            .map_err(|err| persistence(err.into()))?;
        let mut rows = stmt
            .query((self.database, COLLECTION, i64::from(limit)))
            .map_err(|err| persistence(err.into()))?;
        let mut checks = Vec::new();
        while let Some(row) = rows.next().map_err(|err| persistence(err.into()))? {
            let body: String = row.get(0).map_err(|err| persistence(err.into()))?;
            checks.push(decode_json(&body).map_err(persistence)?);
        }
        Ok(checks)
    }
}

fn persistence(err: DbError) -> StatusCheckError {
    tracing::error!(error = %err, "status check store operation failed");
    StatusCheckError::Persistence {
        message: err.to_string(),
    }
}
