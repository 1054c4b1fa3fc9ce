use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{entity::users::Role, models::User};

/// Self-service sign-up; always creates a customer account.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    /// Home dealer; the first dealer by name when omitted.
    pub dealer_id: Option<Uuid>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub role: Role,
    pub dealer_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub exp: usize,
}
