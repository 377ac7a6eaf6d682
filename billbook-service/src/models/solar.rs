//! Solar installation project and its child records.
//!
//! Status fields on the children are free-form strings set by the caller;
//! there is no server-side state machine. The well-known values are:
//! installation_status: planning | in_progress | completed | on_hold,
//! subsidy_status / subsidy tracking status: pending | applied | approved |
//! received | rejected, milestone status: pending | in_progress | completed,
//! document status: pending | submitted | approved | rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarProject {
    pub id: String,
    pub project_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub business_id: String,
    pub project_name: String,
    pub site_address: String,
    pub system_capacity_kw: f64,
    pub panel_type: String,
    pub panel_quantity: i64,
    pub inverter_type: String,
    pub inverter_quantity: i64,
    pub estimated_cost: f64,
    #[serde(default)]
    pub actual_cost: f64,
    #[serde(default)]
    pub subsidy_amount: f64,
    #[serde(default = "default_pending")]
    pub subsidy_status: String,
    pub discom_name: String,
    pub consumer_number: String,
    #[serde(default = "default_planning")]
    pub installation_status: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_pending() -> String {
    "pending".to_string()
}

fn default_planning() -> String {
    "planning".to_string()
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SolarProjectCreate {
    #[validate(length(min = 1, message = "Customer is required"))]
    pub customer_id: String,
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    pub site_address: String,
    pub system_capacity_kw: f64,
    pub panel_type: String,
    pub panel_quantity: i64,
    pub inverter_type: String,
    pub inverter_quantity: i64,
    pub estimated_cost: f64,
    #[serde(default)]
    pub subsidy_amount: f64,
    pub discom_name: String,
    pub consumer_number: String,
    pub start_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl SolarProject {
    pub fn new(
        data: SolarProjectCreate,
        project_number: String,
        customer_name: String,
        business_id: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_number,
            customer_id: data.customer_id,
            customer_name,
            business_id,
            project_name: data.project_name,
            site_address: data.site_address,
            system_capacity_kw: data.system_capacity_kw,
            panel_type: data.panel_type,
            panel_quantity: data.panel_quantity,
            inverter_type: data.inverter_type,
            inverter_quantity: data.inverter_quantity,
            estimated_cost: data.estimated_cost,
            actual_cost: 0.0,
            subsidy_amount: data.subsidy_amount,
            subsidy_status: default_pending(),
            discom_name: data.discom_name,
            consumer_number: data.consumer_number,
            installation_status: default_planning(),
            start_date: data.start_date,
            completion_date: None,
            notes: data.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMilestone {
    pub id: String,
    pub project_id: String,
    pub milestone_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProjectMilestoneCreate {
    #[validate(length(min = 1, message = "Project is required"))]
    pub project_id: String,
    #[validate(length(min = 1, message = "Milestone name is required"))]
    pub milestone_name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amount: f64,
}

impl ProjectMilestone {
    pub fn new(data: ProjectMilestoneCreate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: data.project_id,
            milestone_name: data.milestone_name,
            description: data.description,
            status: default_pending(),
            due_date: data.due_date,
            completion_date: None,
            amount: data.amount,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConsumption {
    pub id: String,
    pub project_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity_used: f64,
    pub consumption_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MaterialConsumptionCreate {
    #[validate(length(min = 1, message = "Project is required"))]
    pub project_id: String,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    pub quantity_used: f64,
    pub consumption_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl MaterialConsumption {
    pub fn new(data: MaterialConsumptionCreate, product_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: data.project_id,
            product_id: data.product_id,
            product_name,
            quantity_used: data.quantity_used,
            consumption_date: data.consumption_date.unwrap_or_else(Utc::now),
            notes: data.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentDocument {
    pub id: String,
    pub project_id: String,
    pub document_type: String,
    pub document_name: String,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GovernmentDocumentCreate {
    #[validate(length(min = 1, message = "Project is required"))]
    pub project_id: String,
    #[validate(length(min = 1, message = "Document type is required"))]
    pub document_type: String,
    #[validate(length(min = 1, message = "Document name is required"))]
    pub document_name: String,
    pub document_number: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default = "default_pending")]
    pub status: String,
    pub notes: Option<String>,
}

impl GovernmentDocument {
    pub fn new(data: GovernmentDocumentCreate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: data.project_id,
            document_type: data.document_type,
            document_name: data.document_name,
            document_url: None,
            document_number: data.document_number,
            issue_date: data.issue_date,
            expiry_date: data.expiry_date,
            status: data.status,
            notes: data.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidyTracking {
    pub id: String,
    pub project_id: String,
    #[serde(default = "default_scheme_name")]
    pub scheme_name: String,
    pub applied_amount: f64,
    #[serde(default)]
    pub approved_amount: f64,
    #[serde(default)]
    pub received_amount: f64,
    #[serde(default)]
    pub application_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub received_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub application_number: Option<String>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_scheme_name() -> String {
    "PM Surya Ghar Yojana".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubsidyTrackingCreate {
    #[validate(length(min = 1, message = "Project is required"))]
    pub project_id: String,
    pub applied_amount: f64,
    pub application_date: Option<DateTime<Utc>>,
    pub application_number: Option<String>,
    pub remarks: Option<String>,
}

impl SubsidyTracking {
    pub fn new(data: SubsidyTrackingCreate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: data.project_id,
            scheme_name: default_scheme_name(),
            applied_amount: data.applied_amount,
            approved_amount: 0.0,
            received_amount: 0.0,
            application_date: data.application_date,
            approval_date: None,
            received_date: None,
            application_number: data.application_number,
            status: default_pending(),
            remarks: data.remarks,
            created_at: Utc::now(),
        }
    }
}
