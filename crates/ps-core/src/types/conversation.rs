use crate::types::ids::ConversationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A saved prompt together with the code that was generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub user_input: String,
    pub generated_output: String,
    pub created_at: DateTime<Utc>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateConversationInput {
    pub user_input: String,
    #[serde(alias = "generated_output")]
    pub python_output: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct ConversationFilter {
    pub session_id: Option<String>,
    pub limit: Option<u32>,
}

impl ConversationFilter {
    pub const DEFAULT_LIMIT: u32 = 50;

    /// An empty session id is treated as no filter at all.
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|value| !value.is_empty())
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_input_accepts_both_output_names() {
        let original: CreateConversationInput =
            serde_json::from_str(r#"{"user_input":"a","python_output":"b"}"#).unwrap();
        let aliased: CreateConversationInput =
            serde_json::from_str(r#"{"user_input":"a","generated_output":"b"}"#).unwrap();
        assert_eq!(original, aliased);
        assert_eq!(original.session_id, None);
    }

    #[test]
    fn empty_session_is_no_filter() {
        let filter = ConversationFilter {
            session_id: Some(String::new()),
            limit: None,
        };
        assert_eq!(filter.session(), None);
        assert_eq!(filter.limit(), 50);
    }
}
