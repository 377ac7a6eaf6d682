use axum::{extract::State, response::IntoResponse, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;
use std::collections::HashMap;

use crate::{middleware::CurrentUser, models::SolarProject, startup::AppState};

pub async fn solar_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(json!({})));
    };

    let total_projects = state
        .db
        .solar_projects()
        .count_documents(doc! { "business_id": &business_id }, None)
        .await?;

    let options = FindOptions::builder().limit(1000).build();
    let projects: Vec<SolarProject> = state
        .db
        .solar_projects()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    let mut status_counts: HashMap<String, u64> = HashMap::new();
    let mut total_capacity = 0.0;
    let mut total_revenue = 0.0;
    let mut total_subsidy = 0.0;

    for project in &projects {
        *status_counts
            .entry(project.installation_status.clone())
            .or_insert(0) += 1;
        total_capacity += project.system_capacity_kw;
        total_revenue += project.estimated_cost;
        total_subsidy += project.subsidy_amount;
    }

    let pending_options = FindOptions::builder().limit(100).build();
    let pending_subsidies: Vec<crate::models::SubsidyTracking> = state
        .db
        .subsidy_tracking()
        .find(doc! { "status": "pending" }, pending_options)
        .await?
        .try_collect()
        .await?;

    let recent_projects: Vec<&SolarProject> = projects.iter().take(5).collect();

    Ok(Json(json!({
        "total_projects": total_projects,
        "projects_by_status": status_counts,
        "total_capacity_kw": total_capacity,
        "total_estimated_revenue": total_revenue,
        "total_subsidy_amount": total_subsidy,
        "pending_subsidies_count": pending_subsidies.len(),
        "recent_projects": recent_projects,
    })))
}
