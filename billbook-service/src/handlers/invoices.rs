use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;

use crate::{
    middleware::{require_business, CurrentUser},
    models::{Invoice, InvoiceCreate},
    services::DocumentFamily,
    startup::AppState,
    utils::ValidatedJson,
};

/// Create an invoice: derive the totals, allocate the next INV number,
/// persist, then walk the items decrementing product stock.
///
/// The stock decrements are fire-and-forget against the committed invoice:
/// they are unchecked (stock may go negative) and a failure part-way leaves
/// the earlier decrements in place. The caller still gets the invoice.
pub async fn create_invoice(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<InvoiceCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;

    let customer = state
        .db
        .customers()
        .find_one(doc! { "id": &req.customer_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let invoice_number = state
        .db
        .next_reference(&business_id, DocumentFamily::Invoice)
        .await?;

    let invoice = Invoice::new(req, invoice_number, customer.name, business_id);

    state.db.invoices().insert_one(&invoice, None).await?;

    for item in &invoice.items {
        if let Err(e) = state
            .db
            .products()
            .update_one(
                doc! { "id": &item.product_id },
                doc! { "$inc": { "stock_quantity": -item.quantity } },
                None,
            )
            .await
        {
            tracing::warn!(
                invoice_id = %invoice.id,
                product_id = %item.product_id,
                error = %e,
                "Stock decrement failed after invoice commit"
            );
        }
    }

    tracing::info!(
        invoice_id = %invoice.id,
        invoice_number = %invoice.invoice_number,
        total = invoice.total,
        "Invoice created"
    );

    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list_invoices(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Invoice>::new()));
    };

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(1000)
        .build();
    let invoices: Vec<Invoice> = state
        .db
        .invoices()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(invoices))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state
        .db
        .invoices()
        .find_one(doc! { "id": &invoice_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    Ok(Json(invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .invoices()
        .delete_one(
            doc! { "id": &invoice_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
    }

    Ok(Json(json!({ "message": "Invoice deleted successfully" })))
}
