use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub business_id: String,
    #[serde(default)]
    pub opening_balance: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct VendorCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gstin: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub opening_balance: f64,
}

impl Vendor {
    pub fn new(data: VendorCreate, business_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            gstin: data.gstin,
            address: data.address,
            business_id,
            opening_balance: data.opening_balance,
            created_at: Utc::now(),
        }
    }
}
