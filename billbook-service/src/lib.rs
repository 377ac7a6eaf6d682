pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    extract::State,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use service_core::error::AppError;
use tower_http::{cors, cors::CorsLayer, trace::TraceLayer};

use crate::startup::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything except signup/login/health sits behind the bearer-token
    // middleware, which resolves the caller before the handler runs.
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/businesses",
            post(handlers::businesses::create_business).get(handlers::businesses::list_businesses),
        )
        .route(
            "/businesses/:id",
            get(handlers::businesses::get_business).put(handlers::businesses::update_business),
        )
        .route(
            "/customers",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route(
            "/customers/:id",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/vendors",
            post(handlers::vendors::create_vendor).get(handlers::vendors::list_vendors),
        )
        .route(
            "/vendors/:id",
            get(handlers::vendors::get_vendor)
                .put(handlers::vendors::update_vendor)
                .delete(handlers::vendors::delete_vendor),
        )
        .route(
            "/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/invoices",
            post(handlers::invoices::create_invoice).get(handlers::invoices::list_invoices),
        )
        .route(
            "/invoices/:id",
            get(handlers::invoices::get_invoice).delete(handlers::invoices::delete_invoice),
        )
        .route(
            "/expense-categories",
            post(handlers::expenses::create_expense_category)
                .get(handlers::expenses::list_expense_categories),
        )
        .route(
            "/expenses",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route(
            "/expenses/:id",
            get(handlers::expenses::get_expense).delete(handlers::expenses::delete_expense),
        )
        .route(
            "/payments",
            post(handlers::payments::create_payment).get(handlers::payments::list_payments),
        )
        .route("/dashboard/stats", get(handlers::reports::dashboard_stats))
        .route("/reports/sales", get(handlers::reports::sales_report))
        .route("/reports/expenses", get(handlers::reports::expense_report))
        .route(
            "/solar/projects",
            post(handlers::solar::projects::create_project)
                .get(handlers::solar::projects::list_projects),
        )
        .route(
            "/solar/projects/:id",
            get(handlers::solar::projects::get_project)
                .put(handlers::solar::projects::update_project)
                .delete(handlers::solar::projects::delete_project),
        )
        .route(
            "/solar/milestones",
            post(handlers::solar::milestones::create_milestone),
        )
        // The path parameter is a project id for GET and a milestone id for
        // PUT; documents and subsidies follow the same convention.
        .route(
            "/solar/milestones/:id",
            get(handlers::solar::milestones::list_milestones)
                .put(handlers::solar::milestones::update_milestone_status),
        )
        .route(
            "/solar/materials",
            post(handlers::solar::materials::create_material_consumption),
        )
        .route(
            "/solar/materials/:id",
            get(handlers::solar::materials::list_material_consumption),
        )
        .route(
            "/solar/documents",
            post(handlers::solar::documents::create_document),
        )
        .route(
            "/solar/documents/:id",
            get(handlers::solar::documents::list_documents)
                .put(handlers::solar::documents::update_document_status),
        )
        .route(
            "/solar/subsidies",
            post(handlers::solar::subsidies::create_subsidy),
        )
        .route(
            "/solar/subsidies/:id",
            get(handlers::solar::subsidies::list_subsidies)
                .put(handlers::solar::subsidies::update_subsidy_status),
        )
        .layer(from_fn_with_state(state.clone(), middleware::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected)
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.security.allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [
        axum::http::header::AUTHORIZATION,
        axum::http::header::CONTENT_TYPE,
    ];

    if allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(methods)
            .allow_headers(headers)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| {
                        tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                        e
                    })
                    .ok()
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
    }
}

/// Service health check: verifies the store connection.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "MongoDB health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "billbook-service",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "mongodb": "up"
        }
    })))
}
