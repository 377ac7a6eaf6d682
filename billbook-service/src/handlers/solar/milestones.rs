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
    models::{ProjectMilestone, ProjectMilestoneCreate},
    startup::AppState,
    utils::ValidatedJson,
};

// Milestones hang off the caller-supplied project_id without a project or
// business ownership check; see DESIGN.md on preserved authorization scoping.
pub async fn create_milestone(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ProjectMilestoneCreate>,
) -> Result<impl IntoResponse, AppError> {
    let milestone = ProjectMilestone::new(req);

    state
        .db
        .project_milestones()
        .insert_one(&milestone, None)
        .await?;

    Ok((StatusCode::CREATED, Json(milestone)))
}

pub async fn list_milestones(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "created_at": 1 })
        .limit(100)
        .build();
    let milestones: Vec<ProjectMilestone> = state
        .db
        .project_milestones()
        .find(doc! { "project_id": &project_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(milestones))
}

#[derive(Debug, Deserialize)]
pub struct MilestoneStatusUpdate {
    pub status: String,
}

/// Set a milestone's status. Any status string is accepted; "completed"
/// additionally stamps the completion date.
pub async fn update_milestone_status(
    State(state): State<AppState>,
    Path(milestone_id): Path<String>,
    Query(update): Query<MilestoneStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let mut set = doc! { "status": &update.status };
    if update.status == "completed" {
        set.insert("completion_date", Utc::now().to_rfc3339());
    }

    let result = state
        .db
        .project_milestones()
        .update_one(doc! { "id": &milestone_id }, doc! { "$set": set }, None)
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Milestone not found")));
    }

    Ok(Json(json!({ "message": "Milestone updated successfully" })))
}
