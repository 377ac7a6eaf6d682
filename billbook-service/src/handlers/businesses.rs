use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document};
use mongodb::options::FindOptions;
use service_core::error::AppError;

use crate::{
    middleware::CurrentUser,
    models::{Business, BusinessCreate},
    startup::AppState,
    utils::ValidatedJson,
};

/// Create a business and point the caller's account at it. A user keeps a
/// single business_id pointer; creating another business moves the pointer.
pub async fn create_business(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<BusinessCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business = Business::new(req, user.id.clone());

    state.db.businesses().insert_one(&business, None).await?;

    state
        .db
        .users()
        .update_one(
            doc! { "id": &user.id },
            doc! { "$set": { "business_id": &business.id } },
            None,
        )
        .await?;

    tracing::info!(business_id = %business.id, owner_id = %user.id, "Business created");

    Ok((StatusCode::CREATED, Json(business)))
}

pub async fn list_businesses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder().limit(100).build();
    let businesses: Vec<Business> = state
        .db
        .businesses()
        .find(doc! { "owner_id": &user.id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(businesses))
}

pub async fn get_business(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = state
        .db
        .businesses()
        .find_one(doc! { "id": &business_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Business not found")))?;

    Ok(Json(business))
}

pub async fn update_business(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<BusinessCreate>,
) -> Result<impl IntoResponse, AppError> {
    let update = to_document(&req).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    let result = state
        .db
        .businesses()
        .update_one(
            doc! { "id": &business_id, "owner_id": &user.id },
            doc! { "$set": update },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Business not found")));
    }

    let business = state
        .db
        .businesses()
        .find_one(doc! { "id": &business_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Business not found")))?;

    Ok(Json(business))
}
