use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A business is the tenant: every other record hangs off its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub owner_id: String,
    #[serde(default = "default_financial_year")]
    pub financial_year: String,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    pub created_at: DateTime<Utc>,
}

fn default_financial_year() -> String {
    "2024-25".to_string()
}

pub(crate) fn default_tax_rate() -> f64 {
    18.0
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BusinessCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub gstin: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

impl Business {
    pub fn new(data: BusinessCreate, owner_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            gstin: data.gstin,
            address: data.address,
            phone: data.phone,
            email: data.email,
            owner_id,
            financial_year: default_financial_year(),
            tax_rate: data.tax_rate,
            created_at: Utc::now(),
        }
    }
}
