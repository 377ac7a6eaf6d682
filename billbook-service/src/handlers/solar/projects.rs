use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document};
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;

use crate::{
    middleware::{require_business, CurrentUser},
    models::{SolarProject, SolarProjectCreate},
    services::DocumentFamily,
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<SolarProjectCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;

    let customer = state
        .db
        .customers()
        .find_one(doc! { "id": &req.customer_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let project_number = state
        .db
        .next_reference(&business_id, DocumentFamily::Project)
        .await?;

    let project = SolarProject::new(req, project_number, customer.name, business_id);

    state.db.solar_projects().insert_one(&project, None).await?;

    tracing::info!(
        project_id = %project.id,
        project_number = %project.project_number,
        capacity_kw = project.system_capacity_kw,
        "Solar project created"
    );

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<SolarProject>::new()));
    };

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(1000)
        .build();
    let projects: Vec<SolarProject> = state
        .db
        .solar_projects()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = state
        .db
        .solar_projects()
        .find_one(doc! { "id": &project_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Project not found")))?;

    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<SolarProjectCreate>,
) -> Result<impl IntoResponse, AppError> {
    let update = to_document(&req).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    let result = state
        .db
        .solar_projects()
        .update_one(
            doc! { "id": &project_id, "business_id": user.business_id.clone() },
            doc! { "$set": update },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Project not found")));
    }

    let project = state
        .db
        .solar_projects()
        .find_one(doc! { "id": &project_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Project not found")))?;

    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .solar_projects()
        .delete_one(
            doc! { "id": &project_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Project not found")));
    }

    Ok(Json(json!({ "message": "Project deleted successfully" })))
}
