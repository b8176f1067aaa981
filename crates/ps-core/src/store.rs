use crate::conversations::ConversationRepository;
use crate::error::HealthError;
use crate::status_checks::StatusCheckRepository;

pub trait Store {
    type StatusChecks<'a>: StatusCheckRepository
    where
        Self: 'a;
    type Conversations<'a>: ConversationRepository
    where
        Self: 'a;

    fn status_checks(&self) -> Self::StatusChecks<'_>;
    fn conversations(&self) -> Self::Conversations<'_>;

    /// Round-trips a trivial command through the backing store.
    fn ping(&self) -> Result<(), HealthError>;
}
