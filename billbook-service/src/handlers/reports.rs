//! Read-side aggregations. Everything here scans capped in-memory batches of
//! documents; results silently truncate at the fetch cap rather than erroring.

use axum::{extract::State, response::IntoResponse, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;
use std::collections::HashMap;

use crate::{
    middleware::CurrentUser,
    models::{Expense, Invoice, Product},
    startup::AppState,
};

const REPORT_FETCH_CAP: i64 = 1000;
const STATS_FETCH_CAP: i64 = 10000;
const RECENT_COUNT: i64 = 5;

pub async fn dashboard_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(json!({})));
    };

    let cap = FindOptions::builder().limit(STATS_FETCH_CAP).build();
    let invoices: Vec<Invoice> = state
        .db
        .invoices()
        .find(doc! { "business_id": &business_id }, cap.clone())
        .await?
        .try_collect()
        .await?;
    let total_sales: f64 = invoices.iter().map(|inv| inv.total).sum();

    let expenses: Vec<Expense> = state
        .db
        .expenses()
        .find(doc! { "business_id": &business_id }, cap.clone())
        .await?
        .try_collect()
        .await?;
    let total_expenses: f64 = expenses.iter().map(|exp| exp.total).sum();

    let outstanding: Vec<Invoice> = state
        .db
        .invoices()
        .find(
            doc! { "business_id": &business_id, "status": { "$ne": "paid" } },
            cap,
        )
        .await?
        .try_collect()
        .await?;
    let total_outstanding: f64 = outstanding.iter().map(|inv| inv.balance).sum();

    let customers_count = state
        .db
        .customers()
        .count_documents(doc! { "business_id": &business_id }, None)
        .await?;
    let products_count = state
        .db
        .products()
        .count_documents(doc! { "business_id": &business_id }, None)
        .await?;

    let recent = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(RECENT_COUNT)
        .build();
    let recent_invoices: Vec<Invoice> = state
        .db
        .invoices()
        .find(doc! { "business_id": &business_id }, recent.clone())
        .await?
        .try_collect()
        .await?;
    let recent_expenses: Vec<Expense> = state
        .db
        .expenses()
        .find(doc! { "business_id": &business_id }, recent)
        .await?
        .try_collect()
        .await?;

    let low_stock_options = FindOptions::builder().limit(RECENT_COUNT).build();
    let low_stock_products: Vec<Product> = state
        .db
        .products()
        .find(
            doc! {
                "business_id": &business_id,
                "$expr": { "$lte": ["$stock_quantity", "$low_stock_alert"] },
            },
            low_stock_options,
        )
        .await?
        .try_collect()
        .await?;

    Ok(Json(json!({
        "total_sales": total_sales,
        "total_expenses": total_expenses,
        "profit": total_sales - total_expenses,
        "total_outstanding": total_outstanding,
        "customers_count": customers_count,
        "invoices_count": invoices.len(),
        "products_count": products_count,
        "recent_invoices": recent_invoices,
        "recent_expenses": recent_expenses,
        "low_stock_products": low_stock_products,
    })))
}

pub async fn sales_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(json!({})));
    };

    let options = FindOptions::builder()
        .sort(doc! { "invoice_date": -1 })
        .limit(REPORT_FETCH_CAP)
        .build();
    let invoices: Vec<Invoice> = state
        .db
        .invoices()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    let total_sales: f64 = invoices.iter().map(|inv| inv.total).sum();
    let total_tax: f64 = invoices.iter().map(|inv| inv.tax_amount).sum();
    let total_paid: f64 = invoices.iter().map(|inv| inv.paid_amount).sum();
    let total_outstanding: f64 = invoices.iter().map(|inv| inv.balance).sum();

    Ok(Json(json!({
        "invoices": invoices,
        "summary": {
            "total_sales": total_sales,
            "total_tax": total_tax,
            "total_paid": total_paid,
            "total_outstanding": total_outstanding,
            "invoice_count": invoices.len(),
        },
    })))
}

pub async fn expense_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(json!({})));
    };

    let options = FindOptions::builder()
        .sort(doc! { "expense_date": -1 })
        .limit(REPORT_FETCH_CAP)
        .build();
    let expenses: Vec<Expense> = state
        .db
        .expenses()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    let total_amount: f64 = expenses.iter().map(|exp| exp.total).sum();

    let mut category_totals: HashMap<String, f64> = HashMap::new();
    for expense in &expenses {
        let category = expense
            .category_name
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        *category_totals.entry(category).or_insert(0.0) += expense.total;
    }

    Ok(Json(json!({
        "expenses": expenses,
        "summary": {
            "total_amount": total_amount,
            "expense_count": expenses.len(),
            "category_breakdown": category_totals,
        },
    })))
}
