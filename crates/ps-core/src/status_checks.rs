use crate::error::StatusCheckError;
use crate::types::StatusCheck;

pub trait StatusCheckRepository {
    fn create(&self, client_name: String) -> Result<StatusCheck, StatusCheckError>;
    /// Returns at most `limit` checks in insertion order.
    fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, StatusCheckError>;
}
