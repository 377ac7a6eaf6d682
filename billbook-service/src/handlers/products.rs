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
    models::{Product, ProductCreate},
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ProductCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;
    let product = Product::new(req, business_id);

    state.db.products().insert_one(&product, None).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Product>::new()));
    };

    let options = FindOptions::builder().limit(1000).build();
    let products: Vec<Product> = state
        .db
        .products()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .db
        .products()
        .find_one(doc! { "id": &product_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    Ok(Json(product))
}

/// Full overwrite, stock_quantity included. Incremental stock movement only
/// happens through invoices and material consumption.
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ProductCreate>,
) -> Result<impl IntoResponse, AppError> {
    let update = to_document(&req).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    let result = state
        .db
        .products()
        .update_one(
            doc! { "id": &product_id, "business_id": user.business_id.clone() },
            doc! { "$set": update },
            None,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }

    let product = state
        .db
        .products()
        .find_one(doc! { "id": &product_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .products()
        .delete_one(
            doc! { "id": &product_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
