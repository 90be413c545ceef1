//! todonum-server: HTTP record store over a single SQLite file
//!
//! Serves two structurally identical collections (todos and numbers) with
//! per-collection CRUD routes and a combined-create endpoint that writes one
//! record to each collection in a single request.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
