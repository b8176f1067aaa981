use crate::util::{DbError, decode_json, encode_json, to_rfc3339};
use ps_core::conversations::ConversationRepository;
use ps_core::error::ConversationError;
use ps_core::types::{
    ConversationFilter, ConversationId, ConversationRecord, CreateConversationInput,
};
use rusqlite::Connection;

pub(crate) const COLLECTION: &str = "conversations";

pub struct ConversationRepo<'a> {
    conn: Option<&'a Connection>,
    database: &'a str,
}

impl<'a> ConversationRepo<'a> {
    pub fn new(conn: Option<&'a Connection>, database: &'a str) -> Self {
        Self { conn, database }
    }

    fn conn(&self) -> Result<&'a Connection, ConversationError> {
        self.conn.ok_or_else(|| persistence(DbError::Closed))
    }
}

impl ConversationRepository for ConversationRepo<'_> {
    fn save(&self, input: CreateConversationInput) -> Result<ConversationRecord, ConversationError> {
        let record = ConversationRecord {
            id: ConversationId::generate(),
            user_input: input.user_input,
            generated_output: input.python_output,
            created_at: chrono::Utc::now(),
            session_id: input.session_id,
        };
        let body = encode_json(&record).map_err(persistence)?;
        let sql = "INSERT INTO documents (db_name, collection, id, body, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
        let params = (
            self.database,
            COLLECTION,
            record.id.as_str(),
            body,
            to_rfc3339(&record.created_at),
        );
        self.conn()?
            .execute(sql, params)
            .map_err(|err| persistence(err.into()))?;
        Ok(record)
    }

    fn list(&self, filter: &ConversationFilter) -> Result<Vec<ConversationRecord>, ConversationError> {
        let sql = "SELECT body FROM documents \
                   WHERE db_name = ?1 AND collection = ?2 \
                   AND (?3 IS NULL OR json_extract(body, '$.session_id') = ?3) \
                   ORDER BY created_at DESC, rowid DESC LIMIT ?4";
        let mut stmt = self
            .conn()?
            .prepare(sql)
            .map_err(|err| persistence(err.into()))?;
        let mut rows = stmt
            .query((
                self.database,
                COLLECTION,
                filter.session(),
                i64::from(filter.limit()),
            ))
            .map_err(|err| persistence(err.into()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|err| persistence(err.into()))? {
            let body: String = row.get(0).map_err(|err| persistence(err.into()))?;
            records.push(decode_json(&body).map_err(persistence)?);
        }
        Ok(records)
    }

    fn delete(&self, id: &ConversationId) -> Result<(), ConversationError> {
        let deleted = self
            .conn()?
            .execute(
                "DELETE FROM documents WHERE db_name = ?1 AND collection = ?2 AND id = ?3",
                (self.database, COLLECTION, id.as_str()),
            )
            .map_err(|err| persistence(err.into()))?;
        if deleted == 0 {
            return Err(ConversationError::NotFound);
        }
        Ok(())
    }
}

fn persistence(err: DbError) -> ConversationError {
    tracing::error!(error = %err, "conversation store operation failed");
    ConversationError::Persistence {
        message: err.to_string(),
    }
}
