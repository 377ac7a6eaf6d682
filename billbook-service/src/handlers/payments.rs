use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use service_core::error::AppError;

use crate::{
    middleware::{require_business, CurrentUser},
    models::{invoice::reconcile_payment, Payment, PaymentCreate},
    services::DocumentFamily,
    startup::AppState,
    utils::ValidatedJson,
};

/// Record a payment. The payment itself always persists; when it names an
/// invoice that exists, that invoice's paid_amount/balance/status are
/// recomputed and written back. A dangling invoice_id is not an error.
pub async fn create_payment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<PaymentCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;

    let payment_number = state
        .db
        .next_reference(&business_id, DocumentFamily::Payment)
        .await?;

    let payment = Payment::new(req, payment_number, business_id);

    state.db.payments().insert_one(&payment, None).await?;

    if let Some(invoice_id) = &payment.invoice_id {
        let invoice = state
            .db
            .invoices()
            .find_one(doc! { "id": invoice_id }, None)
            .await?;

        if let Some(invoice) = invoice {
            let (new_paid, new_balance, new_status) =
                reconcile_payment(invoice.total, invoice.paid_amount, payment.amount);

            state
                .db
                .invoices()
                .update_one(
                    doc! { "id": invoice_id },
                    doc! { "$set": {
                        "paid_amount": new_paid,
                        "balance": new_balance,
                        "status": new_status.to_string(),
                    } },
                    None,
                )
                .await?;

            tracing::info!(
                payment_id = %payment.id,
                invoice_id = %invoice_id,
                balance = new_balance,
                status = %new_status,
                "Payment applied to invoice"
            );
        }
    }

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Payment>::new()));
    };

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(1000)
        .build();
    let payments: Vec<Payment> = state
        .db
        .payments()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(payments))
}
