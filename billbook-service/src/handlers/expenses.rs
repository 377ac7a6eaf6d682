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
    models::{Expense, ExpenseCategory, ExpenseCategoryCreate, ExpenseCreate},
    services::DocumentFamily,
    startup::AppState,
    utils::ValidatedJson,
};

pub async fn create_expense_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ExpenseCategoryCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;
    let category = ExpenseCategory::new(req, business_id);

    state
        .db
        .expense_categories()
        .insert_one(&category, None)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list_expense_categories(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<ExpenseCategory>::new()));
    };

    let options = FindOptions::builder().limit(100).build();
    let categories: Vec<ExpenseCategory> = state
        .db
        .expense_categories()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(categories))
}

/// Create an expense. Category and vendor display names are resolved once,
/// here; an id that doesn't resolve is silently recorded without a name.
pub async fn create_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ExpenseCreate>,
) -> Result<impl IntoResponse, AppError> {
    let business_id = require_business(&user)?;

    let category_name = match &req.category_id {
        Some(category_id) => state
            .db
            .expense_categories()
            .find_one(doc! { "id": category_id }, None)
            .await?
            .map(|category| category.name),
        None => None,
    };

    let vendor_name = match &req.vendor_id {
        Some(vendor_id) => state
            .db
            .vendors()
            .find_one(doc! { "id": vendor_id }, None)
            .await?
            .map(|vendor| vendor.name),
        None => None,
    };

    let expense_number = state
        .db
        .next_reference(&business_id, DocumentFamily::Expense)
        .await?;

    let expense = Expense::new(req, expense_number, category_name, vendor_name, business_id);

    state.db.expenses().insert_one(&expense, None).await?;

    tracing::info!(
        expense_id = %expense.id,
        expense_number = %expense.expense_number,
        total = expense.total,
        "Expense recorded"
    );

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let Some(business_id) = user.business_id else {
        return Ok(Json(Vec::<Expense>::new()));
    };

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(1000)
        .build();
    let expenses: Vec<Expense> = state
        .db
        .expenses()
        .find(doc! { "business_id": &business_id }, options)
        .await?
        .try_collect()
        .await?;

    Ok(Json(expenses))
}

pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let expense = state
        .db
        .expenses()
        .find_one(doc! { "id": &expense_id }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Expense not found")))?;

    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .expenses()
        .delete_one(
            doc! { "id": &expense_id, "business_id": user.business_id.clone() },
            None,
        )
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Expense not found")));
    }

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}
