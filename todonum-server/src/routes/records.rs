//! Record routes - one CRUD handler set shared by both collections
//!
//! The same five handlers serve /todos and /numbers; each nested router
//! injects its `Collection` tag through an `Extension` layer, so registering
//! a collection is one call site in the top-level router.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{Collection, DeleteResponse, Record, RecordInput};

/// CRUD routes for a single collection, meant to be nested at `/{table}`.
pub fn collection_router(collection: Collection) -> Router<Database> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(Extension(collection))
}

/// POST /todos, /numbers - Create a record; the store assigns the id
pub async fn create_record(
    State(db): State<Database>,
    Extension(collection): Extension<Collection>,
    Json(input): Json<RecordInput>,
) -> ServerResult<Json<Record>> {
    let record = db.create_record(collection, &input)?;
    tracing::debug!(collection = %collection, id = record.id, "record created");
    Ok(Json(record))
}

/// GET /todos, /numbers - List all records, id ascending
pub async fn list_records(
    State(db): State<Database>,
    Extension(collection): Extension<Collection>,
) -> ServerResult<Json<Vec<Record>>> {
    let records = db.list_records(collection)?;
    Ok(Json(records))
}

/// GET /todos/{id}, /numbers/{id} - Fetch one record or 404
pub async fn get_record(
    State(db): State<Database>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Record>> {
    let record = db
        .get_record(collection, id)?
        .ok_or_else(|| ServerError::record_not_found(collection))?;

    Ok(Json(record))
}

/// PUT /todos/{id}, /numbers/{id} - Full replace; 404 when no row matched
pub async fn update_record(
    State(db): State<Database>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<i64>,
    Json(input): Json<RecordInput>,
) -> ServerResult<Json<Record>> {
    if !db.update_record(collection, id, &input)? {
        return Err(ServerError::record_not_found(collection));
    }

    Ok(Json(input.into_record(id)))
}

/// DELETE /todos/{id}, /numbers/{id} - Remove one record; 404 when no row matched
pub async fn delete_record(
    State(db): State<Database>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<i64>,
) -> ServerResult<Json<DeleteResponse>> {
    if !db.delete_record(collection, id)? {
        return Err(ServerError::record_not_found(collection));
    }

    tracing::debug!(collection = %collection, id, "record deleted");
    Ok(Json(DeleteResponse {
        message: format!("{} deleted", collection.entity()),
    }))
}
