//! Order store adapters.

pub mod connection;
pub mod memory;
pub mod model;
pub mod sqlite;

pub use connection::{create_pool, run_migrations, DbPool};
pub use memory::MemoryOrderStore;
pub use sqlite::SqliteOrderStore;
