use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub business_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseCategoryCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

impl ExpenseCategory {
    pub fn new(data: ExpenseCategoryCreate, business_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            business_id,
            created_at: Utc::now(),
        }
    }
}

/// Expense document. Category and vendor names are snapshots taken at
/// creation time; renaming the parent later does not touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub expense_number: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    pub business_id: String,
    pub amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    pub total: f64,
    pub expense_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn default_payment_method() -> String {
    "cash".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseCreate {
    pub category_id: Option<String>,
    pub vendor_id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    pub expense_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

impl Expense {
    /// `total = amount + tax_amount`; the resolved names may be None when
    /// the referenced category/vendor id did not resolve.
    pub fn new(
        data: ExpenseCreate,
        expense_number: String,
        category_name: Option<String>,
        vendor_name: Option<String>,
        business_id: String,
    ) -> Self {
        let total = data.amount + data.tax_amount;
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            expense_number,
            category_id: data.category_id,
            category_name,
            vendor_id: data.vendor_id,
            vendor_name,
            business_id,
            amount: data.amount,
            tax_amount: data.tax_amount,
            total,
            expense_date: data.expense_date.unwrap_or_else(Utc::now),
            description: data.description,
            payment_method: data.payment_method,
            receipt_url: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_amount_plus_tax() {
        let expense = Expense::new(
            ExpenseCreate {
                category_id: None,
                vendor_id: None,
                amount: 500.0,
                tax_amount: 90.0,
                expense_date: None,
                description: None,
                payment_method: "bank".to_string(),
            },
            "EXP-00001".to_string(),
            None,
            None,
            "biz-1".to_string(),
        );
        assert_eq!(expense.total, 590.0);
        assert_eq!(expense.payment_method, "bank");
        assert!(expense.category_name.is_none());
    }
}
