#![allow(dead_code)]

use std::env;

use dealership_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        customers::CreateCustomerRequest,
        dealers::CreateDealerRequest,
        vehicles::{CreateManufacturerRequest, CreateVariantRequest, CreateVehicleModelRequest},
    },
    entity::users::Role,
    middleware::auth::AuthUser,
    services::{customer_service, dealer_service, vehicle_service},
    state::AppState,
};
use uuid::Uuid;

/// Connects and migrates, or returns `None` when no database is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match env::var("TEST_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        jwt_ttl_hours: 1,
        db_max_connections: 5,
    };
    Ok(Some(AppState::new(pool, config)))
}

pub fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn auth_user(role: Role, dealer_id: Option<Uuid>, customer_id: Option<Uuid>) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role,
        dealer_id,
        customer_id,
        manufacturer_id: None,
    }
}

pub fn admin() -> AuthUser {
    auth_user(Role::Admin, None, None)
}

pub fn dealer_staff(dealer_id: Uuid) -> AuthUser {
    auth_user(Role::DealerStaff, Some(dealer_id), None)
}

pub fn customer_user(customer_id: Uuid) -> AuthUser {
    auth_user(Role::Customer, None, Some(customer_id))
}

pub async fn create_dealer(state: &AppState) -> anyhow::Result<Uuid> {
    let tag = suffix();
    let resp = dealer_service::create_dealer(
        state,
        &admin(),
        CreateDealerRequest {
            name: format!("Dealer {tag}"),
            email: format!("dealer-{tag}@example.com"),
            phone: None,
            address: None,
        },
    )
    .await?;
    Ok(resp.data.expect("dealer").id)
}

pub async fn create_customer(state: &AppState, dealer_id: Uuid) -> anyhow::Result<Uuid> {
    let tag = suffix();
    let resp = customer_service::create_customer(
        state,
        &dealer_staff(dealer_id),
        CreateCustomerRequest {
            dealer_id: None,
            full_name: format!("Customer {tag}"),
            email: format!("customer-{tag}@example.com"),
            phone: None,
            birthday: None,
        },
    )
    .await?;
    Ok(resp.data.expect("customer").id)
}

pub async fn create_manufacturer(state: &AppState) -> anyhow::Result<Uuid> {
    let resp = vehicle_service::create_manufacturer(
        state,
        &admin(),
        CreateManufacturerRequest {
            name: format!("VinFast {}", suffix()),
            country: Some("Vietnam".to_string()),
            address: None,
        },
    )
    .await?;
    Ok(resp.data.expect("manufacturer").id)
}

pub async fn create_vehicle_model(state: &AppState, manufacturer_id: Uuid) -> anyhow::Result<Uuid> {
    let resp = vehicle_service::create_vehicle_model(
        state,
        &admin(),
        CreateVehicleModelRequest {
            manufacturer_id,
            name: format!("VF 8 {}", suffix()),
            category: Some("SUV".to_string()),
            image_url: None,
        },
    )
    .await?;
    Ok(resp.data.expect("vehicle model").id)
}

/// A fresh manufacturer, model and variant priced at `price`.
pub async fn create_variant(state: &AppState, price: i64) -> anyhow::Result<Uuid> {
    let manufacturer_id = create_manufacturer(state).await?;
    let model_id = create_vehicle_model(state, manufacturer_id).await?;
    let resp = vehicle_service::create_variant(
        state,
        &admin(),
        CreateVariantRequest {
            model_id,
            version: "Plus".to_string(),
            color: Some("Red".to_string()),
            product_year: Some(2024),
            price,
            quantity: Some(3),
        },
    )
    .await?;
    Ok(resp.data.expect("variant").id)
}
