use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use service_core::error::AppError;

use crate::{
    middleware::CurrentUser,
    models::{MaterialConsumption, MaterialConsumptionCreate},
    startup::AppState,
    utils::ValidatedJson,
};

/// Record material drawn from stock for a project. The product must exist
/// (its name is snapshotted); the stock decrement afterwards is unchecked
/// and is not rolled back if it fails.
pub async fn create_material_consumption(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ValidatedJson(req): ValidatedJson<MaterialConsumptionCreate>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .db
        .products()
        .find_one(doc! { "id": &req.product_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    let consumption = MaterialConsumption::new(req, product.name);

    state
        .db
        .material_consumption()
        .insert_one(&consumption, None)
        .await?;

    if let Err(e) = state
        .db
        .products()
        .update_one(
            doc! { "id": &consumption.product_id },
            doc! { "$inc": { "stock_quantity": -consumption.quantity_used } },
            None,
        )
        .await
    {
        tracing::warn!(
            consumption_id = %consumption.id,
            product_id = %consumption.product_id,
            error = %e,
            "Stock decrement failed after consumption commit"
        );
    }

    Ok((StatusCode::CREATED, Json(consumption)))
}

pub async fn list_material_consumption(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let options = FindOptions::builder()
        .sort(doc! { "consumption_date": -1 })
        .limit(1000)
        .build();
    let materials: Vec<MaterialConsumption> = state
        .db
        .material_consumption()
        .find(doc! { "project_id": &project_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(materials))
}
