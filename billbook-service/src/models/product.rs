use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product / inventory item. `stock_quantity` is mutated by invoice creation
/// and material consumption; the update endpoint overwrites it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub price: f64,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    pub business_id: String,
    #[serde(default)]
    pub stock_quantity: f64,
    #[serde(default = "default_low_stock_alert")]
    pub low_stock_alert: f64,
    pub created_at: DateTime<Utc>,
}

fn default_unit() -> String {
    "pcs".to_string()
}

fn default_tax_rate() -> f64 {
    crate::models::business::default_tax_rate()
}

fn default_low_stock_alert() -> f64 {
    10.0
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub hsn_code: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub price: f64,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub stock_quantity: f64,
    #[serde(default = "default_low_stock_alert")]
    pub low_stock_alert: f64,
}

impl Product {
    pub fn new(data: ProductCreate, business_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            description: data.description,
            sku: data.sku,
            hsn_code: data.hsn_code,
            unit: data.unit,
            price: data.price,
            tax_rate: data.tax_rate,
            business_id,
            stock_quantity: data.stock_quantity,
            low_stock_alert: data.low_stock_alert,
            created_at: Utc::now(),
        }
    }

    /// Low-stock predicate used by the dashboard.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_alert
    }
}
