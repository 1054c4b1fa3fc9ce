use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{
    entity::users::Role,
    error::AppError,
    services::auth_service::decode_token,
    state::AppState,
};

/// Principal decoded from the bearer token and passed into every service call.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
}

/// Which rows of the sales side a principal may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Dealer(Uuid),
    Customer(Uuid),
}

impl Scope {
    pub fn dealer_id(self) -> Option<Uuid> {
        match self {
            Scope::Dealer(id) => Some(id),
            _ => None,
        }
    }

    pub fn customer_id(self) -> Option<Uuid> {
        match self {
            Scope::Customer(id) => Some(id),
            _ => None,
        }
    }

    /// Whether a row owned by `dealer_id` / `customer_id` is visible.
    pub fn allows(self, dealer_id: Uuid, customer_id: Uuid) -> bool {
        match self {
            Scope::All => true,
            Scope::Dealer(id) => id == dealer_id,
            Scope::Customer(id) => id == customer_id,
        }
    }
}

impl AuthUser {
    /// Sales-side visibility. EVM staff work on the catalog and dealer network only.
    pub fn scope(&self) -> Result<Scope, AppError> {
        match self.role {
            Role::Admin => Ok(Scope::All),
            Role::DealerStaff => self.dealer_id.map(Scope::Dealer).ok_or(AppError::Forbidden),
            Role::Customer => self.customer_id.map(Scope::Customer).ok_or(AppError::Forbidden),
            Role::EvmStaff => Err(AppError::Forbidden),
        }
    }
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_any_role(user: &AuthUser, roles: &[Role]) -> Result<(), AppError> {
    if !roles.contains(&user.role) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

/// Catalog and dealer-network writes.
pub fn ensure_catalog_writer(user: &AuthUser) -> Result<(), AppError> {
    ensure_any_role(user, &[Role::Admin, Role::EvmStaff])
}

/// Dealer id of a dealer staff member.
pub fn require_dealer(user: &AuthUser) -> Result<Uuid, AppError> {
    ensure_role(user, Role::DealerStaff)?;
    user.dealer_id.ok_or(AppError::Forbidden)
}

/// Customer id of a customer account.
pub fn require_customer(user: &AuthUser) -> Result<Uuid, AppError> {
    ensure_role(user, Role::Customer)?;
    user.customer_id.ok_or(AppError::Forbidden)
}

/// Admins and EVM staff see every dealer, dealer staff only their own.
pub fn ensure_dealer_access(user: &AuthUser, dealer_id: Uuid) -> Result<(), AppError> {
    match user.role {
        Role::Admin | Role::EvmStaff => Ok(()),
        Role::DealerStaff if user.dealer_id == Some(dealer_id) => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();

        let claims = decode_token(&state.config.jwt_secret, token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
            dealer_id: claims.dealer_id,
            customer_id: claims.customer_id,
            manufacturer_id: claims.manufacturer_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role,
            dealer_id: Some(Uuid::new_v4()),
            customer_id: Some(Uuid::new_v4()),
            manufacturer_id: None,
        }
    }

    #[test]
    fn scope_follows_role() {
        let admin = user(Role::Admin);
        assert_eq!(admin.scope().unwrap(), Scope::All);

        let staff = user(Role::DealerStaff);
        assert_eq!(staff.scope().unwrap(), Scope::Dealer(staff.dealer_id.unwrap()));

        let customer = user(Role::Customer);
        assert_eq!(
            customer.scope().unwrap(),
            Scope::Customer(customer.customer_id.unwrap())
        );

        assert!(matches!(user(Role::EvmStaff).scope(), Err(AppError::Forbidden)));
    }

    #[test]
    fn dealer_staff_limited_to_own_dealer() {
        let staff = user(Role::DealerStaff);
        let own = staff.dealer_id.unwrap();
        assert!(ensure_dealer_access(&staff, own).is_ok());
        assert!(ensure_dealer_access(&staff, Uuid::new_v4()).is_err());
        assert!(ensure_dealer_access(&user(Role::Admin), Uuid::new_v4()).is_ok());
        assert!(ensure_dealer_access(&user(Role::Customer), own).is_err());
    }

    #[test]
    fn scope_allows_only_owned_rows() {
        let (dealer, customer) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(Scope::All.allows(dealer, customer));
        assert!(Scope::Dealer(dealer).allows(dealer, Uuid::new_v4()));
        assert!(!Scope::Dealer(Uuid::new_v4()).allows(dealer, customer));
        assert!(Scope::Customer(customer).allows(Uuid::new_v4(), customer));
    }

    #[test]
    fn role_guards() {
        assert!(ensure_catalog_writer(&user(Role::EvmStaff)).is_ok());
        assert!(ensure_catalog_writer(&user(Role::DealerStaff)).is_err());
        assert!(require_customer(&user(Role::DealerStaff)).is_err());
        assert!(require_dealer(&user(Role::DealerStaff)).is_ok());
    }
}
