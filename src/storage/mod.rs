pub mod file;
pub mod memory;
pub mod model;
pub mod repo;
pub mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use model::*;
pub use repo::*;
pub use sqlite::SqliteStorage;
