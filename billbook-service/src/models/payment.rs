use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payment record. Optionally linked to one invoice; applying it is the only
/// write path that mutates invoice derived fields after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub payment_number: String,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub business_id: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_payment_method() -> String {
    crate::models::expense::default_payment_method()
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentCreate {
    pub invoice_id: Option<String>,
    pub customer_id: Option<String>,
    pub amount: f64,
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(data: PaymentCreate, payment_number: String, business_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payment_number,
            invoice_id: data.invoice_id,
            customer_id: data.customer_id,
            business_id,
            amount: data.amount,
            payment_date: data.payment_date.unwrap_or_else(Utc::now),
            payment_method: data.payment_method,
            reference: data.reference,
            notes: data.notes,
            created_at: Utc::now(),
        }
    }
}
