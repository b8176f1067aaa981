pub mod conversation_repo;
pub mod pool;
pub mod schema;
pub mod status_check_repo;
pub mod store;
pub mod util;

pub use pool::DbPool;
pub use store::DbStore;
pub use util::DbError;
