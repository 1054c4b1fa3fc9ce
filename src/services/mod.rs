pub mod admin_service;
pub mod auth_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod dealer_service;
pub mod sales_service;
pub mod vehicle_service;
