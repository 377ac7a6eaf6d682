pub mod business;
pub mod customer;
pub mod expense;
pub mod invoice;
pub mod payment;
pub mod product;
pub mod solar;
pub mod user;
pub mod vendor;

pub use business::{Business, BusinessCreate};
pub use customer::{Customer, CustomerCreate};
pub use expense::{Expense, ExpenseCategory, ExpenseCategoryCreate, ExpenseCreate};
pub use invoice::{Invoice, InvoiceCreate, InvoiceItem, InvoiceStatus};
pub use payment::{Payment, PaymentCreate};
pub use product::{Product, ProductCreate};
pub use solar::{
    GovernmentDocument, GovernmentDocumentCreate, MaterialConsumption, MaterialConsumptionCreate,
    ProjectMilestone, ProjectMilestoneCreate, SolarProject, SolarProjectCreate, SubsidyTracking,
    SubsidyTrackingCreate,
};
pub use user::{AuthResponse, LoginRequest, SignupRequest, User, UserProfile};
pub use vendor::{Vendor, VendorCreate};
