use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::TransactionTrait;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    config::AppConfig,
    dto::auth::{Claims, CreateStaffRequest, LoginRequest, LoginResponse, RegisterRequest},
    entity::users::{Model as UserModel, Role},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    repositories::{customers, dealers, manufacturers, users},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(config: &AppConfig, user: &UserModel) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        dealer_id: user.dealer_id,
        customer_id: user.customer_id,
        manufacturer_id: user.manufacturer_id,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(secret: &str, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
}

async fn email_taken(state: &AppState, email: &str) -> AppResult<bool> {
    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE lower(email) = lower($1)")
        .bind(email.trim())
        .fetch_optional(&state.pool)
        .await?;
    Ok(exist.is_some())
}

/// Public sign-up. Creates the customer record and the login in one transaction.
pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    if email_taken(state, &payload.email).await? {
        return Err(AppError::Conflict("Email is already taken".into()));
    }
    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;

    // A customer already entered by dealer staff gets the login attached.
    let customer = match customers::find_by_email(&txn, &payload.email).await? {
        Some(existing) => existing,
        None => {
            let dealer = match payload.dealer_id {
                Some(id) => dealers::find(&txn, id).await?,
                None => dealers::first_by_name(&txn).await?,
            };
            let dealer = match dealer {
                Some(d) => d,
                None => return Err(AppError::bad_request("No dealer available for registration")),
            };
            customers::insert(
                &txn,
                customers::NewCustomer {
                    dealer_id: dealer.id,
                    full_name: payload.full_name.clone(),
                    email: payload.email.clone(),
                    phone: payload.phone.clone(),
                    birthday: None,
                },
            )
            .await?
        }
    };

    let user = users::insert(
        &txn,
        users::NewUser {
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            password_hash,
            role: Role::Customer,
            dealer_id: Some(customer.dealer_id),
            manufacturer_id: None,
            customer_id: Some(customer.id),
        },
    )
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = %user.id, customer_id = %customer.id, "customer registered");
    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id, "customer_id": customer.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("User created", User::from(user), Some(Meta::empty())))
}

/// Admin-only creation of staff accounts.
pub async fn create_staff_user(
    state: &AppState,
    admin: &AuthUser,
    payload: CreateStaffRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(admin)?;
    payload.validate()?;

    let (dealer_id, manufacturer_id) = match payload.role {
        Role::Customer => {
            return Err(AppError::bad_request(
                "Customer accounts are created through registration",
            ));
        }
        Role::Admin => (None, None),
        Role::DealerStaff => {
            let id = payload
                .dealer_id
                .ok_or_else(|| AppError::bad_request("Dealer staff need a dealer_id"))?;
            if dealers::find(&state.orm, id).await?.is_none() {
                return Err(AppError::NotFound);
            }
            (Some(id), None)
        }
        Role::EvmStaff => {
            let id = payload
                .manufacturer_id
                .ok_or_else(|| AppError::bad_request("EVM staff need a manufacturer_id"))?;
            if manufacturers::find(&state.orm, id).await?.is_none() {
                return Err(AppError::NotFound);
            }
            (None, Some(id))
        }
    };

    if email_taken(state, &payload.email).await? {
        return Err(AppError::Conflict("Email is already taken".into()));
    }

    let user = users::insert(
        &state.orm,
        users::NewUser {
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            password_hash: hash_password(&payload.password)?,
            role: payload.role,
            dealer_id,
            manufacturer_id,
            customer_id: None,
        },
    )
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(admin.user_id),
        "staff_create",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id, "role": user.role })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Staff user created", User::from(user), Some(Meta::empty())))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    payload.validate()?;
    let user = users::find_by_email(&state.orm, &payload.email).await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = issue_token(&state.config, &user)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            user: User::from(user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = users::find(&state.orm, user.user_id).await?;
    match found {
        Some(u) => Ok(ApiResponse::success("OK", User::from(u), Some(Meta::empty()))),
        None => Err(AppError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 3000,
            jwt_secret: "test-secret".into(),
            jwt_ttl_hours: 1,
            db_max_connections: 1,
        }
    }

    fn dealer_staff() -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            full_name: "Staff".into(),
            email: "staff@example.com".into(),
            phone: None,
            password_hash: String::new(),
            role: Role::DealerStaff,
            dealer_id: Some(Uuid::new_v4()),
            manufacturer_id: None,
            customer_id: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn token_carries_principal() {
        let config = config();
        let user = dealer_staff();
        let token = issue_token(&config, &user).unwrap();
        let claims = decode_token(&config.jwt_secret, &token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::DealerStaff);
        assert_eq!(claims.dealer_id, user.dealer_id);
        assert_eq!(claims.customer_id, None);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&config(), &dealer_staff()).unwrap();
        let err = decode_token("another-secret", &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
