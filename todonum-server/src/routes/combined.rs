//! Combined create route - one insert into each collection
//!
//! The only handler that runs two storage operations per invocation.

use axum::{extract::State, Json};

use crate::db::Database;
use crate::error::ServerResult;
use crate::models::{Collection, CombinedRequest, CombinedResponse};

/// POST /combined - Create one todo and one number in a single request.
///
/// The two inserts run sequentially and do not share a transaction: if the
/// second fails, the first stays committed.
pub async fn create_combined(
    State(db): State<Database>,
    Json(req): Json<CombinedRequest>,
) -> ServerResult<Json<CombinedResponse>> {
    let todo = db.create_record(Collection::Todo, &req.todo)?;
    let number = db.create_record(Collection::Number, &req.number)?;

    tracing::debug!(todo_id = todo.id, number_id = number.id, "combined create");
    Ok(Json(CombinedResponse { todo, number }))
}
