use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;

use crate::{
    middleware::CurrentUser,
    models::{SubsidyTracking, SubsidyTrackingCreate},
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_subsidy(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ValidatedJson(req): ValidatedJson<SubsidyTrackingCreate>,
) -> Result<impl IntoResponse, AppError> {
    let subsidy = SubsidyTracking::new(req);

    state
        .db
        .subsidy_tracking()
        .insert_one(&subsidy, None)
        .await?;

    Ok((StatusCode::CREATED, Json(subsidy)))
}

pub async fn list_subsidies(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(100)
        .build();
    let subsidies: Vec<SubsidyTracking> = state
        .db
        .subsidy_tracking()
        .find(doc! { "project_id": &project_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(subsidies))
}

#[derive(Debug, Deserialize)]
pub struct SubsidyStatusUpdate {
    pub status: String,
    pub approved_amount: Option<f64>,
    pub received_amount: Option<f64>,
}

/// Set a subsidy's status. "approved" and "received" additionally record the
/// amount and stamp the matching date when the amount is supplied.
pub async fn update_subsidy_status(
    State(state): State<AppState>,
    Path(subsidy_id): Path<String>,
    Query(update): Query<SubsidyStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let mut set = doc! { "status": &update.status };

    if update.status == "approved" {
        if let Some(approved_amount) = update.approved_amount {
            set.insert("approved_amount", approved_amount);
            set.insert("approval_date", Utc::now().to_rfc3339());
        }
    }

    if update.status == "received" {
        if let Some(received_amount) = update.received_amount {
            set.insert("received_amount", received_amount);
            set.insert("received_date", Utc::now().to_rfc3339());
        }
    }

    let result = state
        .db
        .subsidy_tracking()
        .update_one(doc! { "id": &subsidy_id }, doc! { "$set": set }, None)
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Subsidy record not found"
        )));
    }

    Ok(Json(json!({ "message": "Subsidy updated successfully" })))
}
