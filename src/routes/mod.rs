use axum::{Router, routing::get};

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod dealers;
pub mod doc;
pub mod feedbacks;
pub mod health;
pub mod orders;
pub mod params;
pub mod quotations;
pub mod test_drives;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/manufacturers", catalog::manufacturers_router())
        .nest("/vehicle-models", catalog::vehicle_models_router())
        .nest("/variants", catalog::variants_router())
        .nest("/dealers", dealers::router())
        .nest("/dealer-contracts", dealers::contracts_router())
        .nest("/customers", customers::router())
        .nest("/orders", orders::router())
        .nest("/quotations", quotations::router())
        .nest("/test-drives", test_drives::router())
        .nest("/feedbacks", feedbacks::router())
        .nest("/reports", customers::reports_router())
        .nest("/admin", admin::router())
        .route("/dashboard", get(dashboard::dashboard))
}
