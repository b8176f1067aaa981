pub mod conversations;
pub mod error;
pub mod scribe;
pub mod status_checks;
pub mod store;

pub mod types;

pub use crate::error::ScribeError;
pub use crate::scribe::Scribe;
pub use crate::store::Store;
