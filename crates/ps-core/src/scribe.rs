use crate::conversations::ConversationRepository;
use crate::error::ScribeError;
use crate::status_checks::StatusCheckRepository;
use crate::store::Store;
use crate::types::{
    ConversationFilter, ConversationId, ConversationRecord, CreateConversationInput,
    HealthReport, StatusCheck,
};
use chrono::Utc;

/// Upper bound for any listing, whatever the caller asks for.
pub const MAX_LIST_LIMIT: u32 = 1000;

pub struct Scribe<S: Store> {
    store: S,
}

impl<S: Store> Scribe<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn status_checks(&self) -> StatusChecksApi<'_, S> {
        StatusChecksApi { core: self }
    }

    pub fn conversations(&self) -> ConversationsApi<'_, S> {
        ConversationsApi { core: self }
    }

    pub fn health(&self) -> HealthApi<'_, S> {
        HealthApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct StatusChecksApi<'a, S: Store> {
    core: &'a Scribe<S>,
}

impl<S: Store> StatusChecksApi<'_, S> {
    pub const DEFAULT_LIMIT: u32 = 1000;

    pub fn create(&self, client_name: String) -> Result<StatusCheck, ScribeError> {
        self.core
            .store
            .status_checks()
            .create(client_name)
            .map_err(ScribeError::from)
    }

    pub fn list(&self, limit: Option<u32>) -> Result<Vec<StatusCheck>, ScribeError> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT).min(MAX_LIST_LIMIT);
        self.core
            .store
            .status_checks()
            .list(limit)
            .map_err(ScribeError::from)
    }
}

pub struct ConversationsApi<'a, S: Store> {
    core: &'a Scribe<S>,
}

impl<S: Store> ConversationsApi<'_, S> {
    pub fn save(&self, input: CreateConversationInput) -> Result<ConversationRecord, ScribeError> {
        self.core
            .store
            .conversations()
            .save(input)
            .map_err(ScribeError::from)
    }

    pub fn list(&self, filter: ConversationFilter) -> Result<Vec<ConversationRecord>, ScribeError> {
        let filter = ConversationFilter {
            limit: Some(filter.limit().min(MAX_LIST_LIMIT)),
            ..filter
        };
        self.core
            .store
            .conversations()
            .list(&filter)
            .map_err(ScribeError::from)
    }

    pub fn delete(&self, id: &ConversationId) -> Result<(), ScribeError> {
        self.core
            .store
            .conversations()
            .delete(id)
            .map_err(ScribeError::from)
    }
}

pub struct HealthApi<'a, S: Store> {
    core: &'a Scribe<S>,
}

impl<S: Store> HealthApi<'_, S> {
    pub fn check(&self) -> Result<HealthReport, ScribeError> {
        self.core.store.ping()?;
        Ok(HealthReport::healthy(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConversationError, HealthError, StatusCheckError};
    use crate::types::StatusCheckId;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryStore {
        checks: RefCell<Vec<StatusCheck>>,
        last_limit: Cell<Option<u32>>,
        reachable: bool,
    }

    struct Checks<'a>(&'a MemoryStore);
    struct Conversations<'a>(&'a MemoryStore);

    impl StatusCheckRepository for Checks<'_> {
        fn create(&self, client_name: String) -> Result<StatusCheck, StatusCheckError> {
            let check = StatusCheck {
                id: StatusCheckId::generate(),
                client_name,
                created_at: Utc::now(),
            };
            self.0.checks.borrow_mut().push(check.clone());
            Ok(check)
        }

        fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, StatusCheckError> {
            self.0.last_limit.set(Some(limit));
            Ok(self.0.checks.borrow().iter().take(limit as usize).cloned().collect())
        }
    }

    impl ConversationRepository for Conversations<'_> {
        fn save(&self, _input: CreateConversationInput) -> Result<ConversationRecord, ConversationError> {
            Err(ConversationError::Persistence {
                message: "read only".to_string(),
            })
        }

        fn list(&self, filter: &ConversationFilter) -> Result<Vec<ConversationRecord>, ConversationError> {
            self.0.last_limit.set(filter.limit);
            Ok(Vec::new())
        }

        fn delete(&self, _id: &ConversationId) -> Result<(), ConversationError> {
            Err(ConversationError::NotFound)
        }
    }

    impl Store for MemoryStore {
        type StatusChecks<'a> = Checks<'a>;
        type Conversations<'a> = Conversations<'a>;

        fn status_checks(&self) -> Self::StatusChecks<'_> {
            Checks(self)
        }

        fn conversations(&self) -> Self::Conversations<'_> {
            Conversations(self)
        }

        fn ping(&self) -> Result<(), HealthError> {
            if self.reachable {
                Ok(())
            } else {
                Err(HealthError::Unavailable {
                    message: "unreachable".to_string(),
                })
            }
        }
    }

    #[test]
    fn status_check_limit_defaults_and_caps() {
        let scribe = Scribe::new(MemoryStore::default());
        scribe.status_checks().create("monitor".to_string()).unwrap();
        assert_eq!(scribe.status_checks().list(None).unwrap().len(), 1);
        assert_eq!(scribe.store().last_limit.get(), Some(1000));
        scribe.status_checks().list(Some(50_000)).unwrap();
        assert_eq!(scribe.store().last_limit.get(), Some(MAX_LIST_LIMIT));
    }

    #[test]
    fn conversation_limit_defaults_to_fifty() {
        let scribe = Scribe::new(MemoryStore::default());
        scribe.conversations().list(ConversationFilter::default()).unwrap();
        assert_eq!(scribe.store().last_limit.get(), Some(50));
    }

    #[test]
    fn repository_errors_fold_into_scribe_error() {
        let scribe = Scribe::new(MemoryStore::default());
        let err = scribe
            .conversations()
            .delete(&ConversationId::generate())
            .unwrap_err();
        assert!(matches!(err, ScribeError::Conversation(ConversationError::NotFound)));
    }

    #[test]
    fn health_reflects_ping() {
        let down = Scribe::new(MemoryStore::default());
        assert!(matches!(
            down.health().check(),
            Err(ScribeError::Health(HealthError::Unavailable { .. }))
        ));

        let up = Scribe::new(MemoryStore {
            reachable: true,
            ..MemoryStore::default()
        });
        let report = up.health().check().unwrap();
        assert_eq!(report.status, "healthy");
        assert_eq!(report.services.database, "connected");
    }
}
