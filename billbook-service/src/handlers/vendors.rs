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
    models::{Vendor, VendorCreate},
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_vendor(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<VendorCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;
    let vendor = Vendor::new(req, business_id);

    state.db.vendors().insert_one(&vendor, None).await?;

    Ok((StatusCode::CREATED, Json(vendor)))
}

pub async fn list_vendors(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Vendor>::new()));
    };

    let options = FindOptions::builder().limit(1000).build();
    let vendors: Vec<Vendor> = state
        .db
        .vendors()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(vendors))
}

pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vendor = state
        .db
        .vendors()
        .find_one(doc! { "id": &vendor_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

    Ok(Json(vendor))
}

pub async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<VendorCreate>,
) -> Result<impl IntoResponse, AppError> {
    let update = to_document(&req).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    let result = state
        .db
        .vendors()
        .update_one(
            doc! { "id": &vendor_id, "business_id": user.business_id.clone() },
            doc! { "$set": update },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Vendor not found")));
    }

    let vendor = state
        .db
        .vendors()
        .find_one(doc! { "id": &vendor_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Vendor not found")))?;

    Ok(Json(vendor))
}

pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .vendors()
        .delete_one(
            doc! { "id": &vendor_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Vendor not found")));
    }

    Ok(Json(json!({ "message": "Vendor deleted successfully" })))
}
