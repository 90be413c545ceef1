//! Route handlers for todonum-server
//!
//! Organized by resource type:
//! - records: per-collection CRUD (todos, numbers)
//! - combined: one request creating a record in each collection
//! - health: health check endpoint

pub mod combined;
pub mod health;
pub mod records;

pub use combined::create_combined;
pub use health::health_check;
pub use records::collection_router;
