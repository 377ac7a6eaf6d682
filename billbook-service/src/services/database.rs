//! MongoDB access for the billbook service.
//!
//! The database is used as a plain document store: one collection per entity
//! family, documents keyed by the application-level `id` string, and all
//! dates persisted as ISO-8601 strings via serde.

use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

use crate::models::{
    Business, Customer, Expense, ExpenseCategory, GovernmentDocument, Invoice,
    MaterialConsumption, Payment, Product, ProjectMilestone, SolarProject, SubsidyTracking, User,
    Vendor,
};
use crate::services::sequence::Counter;

#[derive(Clone)]
pub struct BillbookDb {
    client: MongoClient,
    db: Database,
}

impl BillbookDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes");

        // Email uniqueness backs the signup conflict check.
        self.create_index("users", doc! { "email": 1 }, true).await?;
        self.create_index("users", doc! { "id": 1 }, true).await?;

        self.create_index("businesses", doc! { "owner_id": 1 }, false)
            .await?;
        for name in [
            "customers",
            "vendors",
            "products",
            "invoices",
            "expense_categories",
            "expenses",
            "payments",
            "solar_projects",
        ] {
            self.create_index(name, doc! { "business_id": 1 }, false)
                .await?;
        }
        for name in [
            "project_milestones",
            "material_consumption",
            "government_documents",
            "subsidy_tracking",
        ] {
            self.create_index(name, doc! { "project_id": 1 }, false)
                .await?;
        }

        // One counter document per (business, family); the unique index keeps
        // the upsert from ever producing two.
        self.create_index("counters", doc! { "business_id": 1, "family": 1 }, true)
            .await?;

        tracing::info!("MongoDB indexes created");
        Ok(())
    }

    async fn create_index(
        &self,
        collection: &str,
        keys: Document,
        unique: bool,
    ) -> Result<(), AppError> {
        let options = IndexOptions::builder().unique(unique).build();
        let index = IndexModel::builder().keys(keys).options(options).build();
        self.db
            .collection::<Document>(collection)
            .create_index(index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index on {}: {}", collection, e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn businesses(&self) -> Collection<Business> {
        self.db.collection("businesses")
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection("customers")
    }

    pub fn vendors(&self) -> Collection<Vendor> {
        self.db.collection("vendors")
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection("products")
    }

    pub fn invoices(&self) -> Collection<Invoice> {
        self.db.collection("invoices")
    }

    pub fn expense_categories(&self) -> Collection<ExpenseCategory> {
        self.db.collection("expense_categories")
    }

    pub fn expenses(&self) -> Collection<Expense> {
        self.db.collection("expenses")
    }

    pub fn payments(&self) -> Collection<Payment> {
        self.db.collection("payments")
    }

    pub fn solar_projects(&self) -> Collection<SolarProject> {
        self.db.collection("solar_projects")
    }

    pub fn project_milestones(&self) -> Collection<ProjectMilestone> {
        self.db.collection("project_milestones")
    }

    pub fn material_consumption(&self) -> Collection<MaterialConsumption> {
        self.db.collection("material_consumption")
    }

    pub fn government_documents(&self) -> Collection<GovernmentDocument> {
        self.db.collection("government_documents")
    }

    pub fn subsidy_tracking(&self) -> Collection<SubsidyTracking> {
        self.db.collection("subsidy_tracking")
    }

    pub(crate) fn counters(&self) -> Collection<Counter> {
        self.db.collection("counters")
    }
}
