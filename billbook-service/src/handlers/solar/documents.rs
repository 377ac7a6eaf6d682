use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;

use crate::{
    middleware::CurrentUser,
    models::{GovernmentDocument, GovernmentDocumentCreate},
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_document(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ValidatedJson(req): ValidatedJson<GovernmentDocumentCreate>,
) -> Result<impl IntoResponse, AppError> {
    let document = GovernmentDocument::new(req);

    state
        .db
        .government_documents()
        .insert_one(&document, None)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(100)
        .build();
    let documents: Vec<GovernmentDocument> = state
        .db
        .government_documents()
        .find(doc! { "project_id": &project_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(documents))
}

#[derive(Debug, Deserialize)]
pub struct DocumentStatusUpdate {
    pub status: String,
}

pub async fn update_document_status(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(update): Query<DocumentStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .government_documents()
        .update_one(
            doc! { "id": &document_id },
            doc! { "$set": { "status": &update.status } },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Document not found")));
    }

    Ok(Json(json!({ "message": "Document updated successfully" })))
}
