pub mod conversation;
pub mod health;
pub mod ids;
pub mod status;
pub mod stream;

pub use conversation::{ConversationFilter, ConversationRecord, CreateConversationInput};
pub use health::{HealthReport, ServiceStatus};
pub use ids::{ConversationId, IdError, StatusCheckId};
pub use status::{CreateStatusCheckInput, StatusCheck};
pub use stream::StreamEvent;
