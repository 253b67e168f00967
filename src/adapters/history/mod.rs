//! History store adapters.
//!
//! - `InMemoryHistoryStore` - process-local, for development and tests
//!
//! The PostgreSQL implementation lives with the other database adapters in
//! `adapters::postgres`.

mod in_memory;

pub use in_memory::InMemoryHistoryStore;
