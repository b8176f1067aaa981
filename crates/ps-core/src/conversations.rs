use crate::error::ConversationError;
use crate::types::{ConversationFilter, ConversationId, ConversationRecord, CreateConversationInput};

pub trait ConversationRepository {
    fn save(&self, input: CreateConversationInput) -> Result<ConversationRecord, ConversationError>;
    /// Newest first, optionally restricted to one session.
    fn list(&self, filter: &ConversationFilter) -> Result<Vec<ConversationRecord>, ConversationError>;
    fn delete(&self, id: &ConversationId) -> Result<(), ConversationError>;
}
