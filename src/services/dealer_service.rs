use sea_orm::Set;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::dealers::{
        CreateDealerContractRequest, CreateDealerRequest, DealerContractList, DealerList,
        DealerSales, UpdateDealerContractRequest, UpdateDealerRequest,
    },
    entity::{
        dealer_contracts::ActiveModel as DealerContractActive, dealers::ActiveModel as DealerActive,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_catalog_writer, ensure_dealer_access},
    models::{Dealer, DealerContract},
    repositories::{customers, dealer_contracts, dealers, manufacturers, orders, orders::OrderFilter},
    response::{ApiResponse, Meta},
    routes::params::{DateRangeQuery, PageQuery},
    state::AppState,
};

pub async fn list_dealers(
    state: &AppState,
    user: &AuthUser,
    query: PageQuery,
) -> AppResult<ApiResponse<DealerList>> {
    ensure_catalog_writer(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let (rows, total) = dealers::list(&state.orm, limit as u64, offset as u64).await?;
    let items = rows.into_iter().map(Dealer::from).collect();
    Ok(ApiResponse::success(
        "Dealers",
        DealerList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

pub async fn get_dealer(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Dealer>> {
    ensure_dealer_access(user, id)?;
    match dealers::find(&state.orm, id).await? {
        Some(d) => Ok(ApiResponse::success("Dealer", Dealer::from(d), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_dealer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDealerRequest,
) -> AppResult<ApiResponse<Dealer>> {
    ensure_admin(user)?;
    payload.validate()?;
    if dealers::email_taken(&state.orm, &payload.email, None).await? {
        return Err(AppError::Conflict("Dealer email is already used".into()));
    }

    let dealer = dealers::insert(
        &state.orm,
        payload.name.trim().to_string(),
        payload.email.trim().to_string(),
        payload.phone,
        payload.address,
    )
    .await?;
    tracing::info!(dealer_id = %dealer.id, "dealer created");
    audit::record(
        state,
        user,
        "dealer_create",
        "dealers",
        serde_json::json!({ "dealer_id": dealer.id }),
    )
    .await;

    Ok(ApiResponse::success("Dealer created", Dealer::from(dealer), Some(Meta::empty())))
}

pub async fn update_dealer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateDealerRequest,
) -> AppResult<ApiResponse<Dealer>> {
    ensure_admin(user)?;
    payload.validate()?;
    let existing = match dealers::find(&state.orm, id).await? {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };

    let mut active: DealerActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = payload.email {
        if dealers::email_taken(&state.orm, &email, Some(id)).await? {
            return Err(AppError::Conflict("Dealer email is already used".into()));
        }
        active.email = Set(email.trim().to_string());
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    let dealer = dealers::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "dealer_update",
        "dealers",
        serde_json::json!({ "dealer_id": dealer.id }),
    )
    .await;
    Ok(ApiResponse::success("Dealer updated", Dealer::from(dealer), Some(Meta::empty())))
}

/// Refused while contracts, customers or orders still reference the dealer.
pub async fn delete_dealer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let existing = match dealers::find(&state.orm, id).await? {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };

    if dealer_contracts::exists_for_dealer(&state.orm, id).await? {
        return Err(AppError::Conflict("Dealer still has contracts".into()));
    }
    if customers::count_for_dealer(&state.orm, id).await? > 0 {
        return Err(AppError::Conflict("Dealer still has customers".into()));
    }
    if orders::exists(&state.orm, &OrderFilter::for_dealer(id)).await? {
        return Err(AppError::Conflict("Dealer still has orders".into()));
    }
    dealers::delete(&state.orm, existing).await?;

    tracing::info!(dealer_id = %id, "dealer deleted");
    audit::record(
        state,
        user,
        "dealer_delete",
        "dealers",
        serde_json::json!({ "dealer_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Dealer deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

// Dealer contracts

pub async fn list_dealer_contracts(
    state: &AppState,
    user: &AuthUser,
    dealer_id: Uuid,
) -> AppResult<ApiResponse<DealerContractList>> {
    ensure_dealer_access(user, dealer_id)?;
    if dealers::find(&state.orm, dealer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let items: Vec<DealerContract> = dealer_contracts::list_for_dealer(&state.orm, dealer_id)
        .await?
        .into_iter()
        .map(DealerContract::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Dealer contracts", DealerContractList { items }, Some(meta)))
}

pub async fn get_dealer_contract(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<DealerContract>> {
    let contract = match dealer_contracts::find(&state.orm, id).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    ensure_dealer_access(user, contract.dealer_id)?;
    Ok(ApiResponse::success("Dealer contract", DealerContract::from(contract), None))
}

pub async fn create_dealer_contract(
    state: &AppState,
    user: &AuthUser,
    dealer_id: Uuid,
    payload: CreateDealerContractRequest,
) -> AppResult<ApiResponse<DealerContract>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    if dealers::find(&state.orm, dealer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    if manufacturers::find(&state.orm, payload.manufacturer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let contract = dealer_contracts::insert(
        &state.orm,
        dealer_id,
        payload.manufacturer_id,
        payload.target_sales,
        payload.credit_limit,
        payload.signed_date,
    )
    .await?;
    audit::record(
        state,
        user,
        "dealer_contract_create",
        "dealer_contracts",
        serde_json::json!({ "contract_id": contract.id, "dealer_id": dealer_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Dealer contract created",
        DealerContract::from(contract),
        Some(Meta::empty()),
    ))
}

pub async fn update_dealer_contract(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateDealerContractRequest,
) -> AppResult<ApiResponse<DealerContract>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    let existing = match dealer_contracts::find(&state.orm, id).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: DealerContractActive = existing.into();
    if let Some(target_sales) = payload.target_sales {
        active.target_sales = Set(Some(target_sales));
    }
    if let Some(credit_limit) = payload.credit_limit {
        active.credit_limit = Set(Some(credit_limit));
    }
    if let Some(signed_date) = payload.signed_date {
        active.signed_date = Set(Some(signed_date));
    }
    let contract = dealer_contracts::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "dealer_contract_update",
        "dealer_contracts",
        serde_json::json!({ "contract_id": contract.id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Dealer contract updated",
        DealerContract::from(contract),
        Some(Meta::empty()),
    ))
}

/// Sum of order totals of the dealer's Completed orders, optionally within
/// an order-date range.
pub async fn dealer_total_sales(
    state: &AppState,
    user: &AuthUser,
    dealer_id: Uuid,
    range: DateRangeQuery,
) -> AppResult<ApiResponse<DealerSales>> {
    ensure_dealer_access(user, dealer_id)?;
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::bad_request("'from' must not be after 'to'"));
        }
    }
    if dealers::find(&state.orm, dealer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let total_sales =
        orders::completed_sales_total(&state.orm, Some(dealer_id), None, range.from, range.to)
            .await?;
    Ok(ApiResponse::success(
        "Dealer sales",
        DealerSales {
            dealer_id,
            from: range.from,
            to: range.to,
            total_sales,
        },
        None,
    ))
}
