use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::dealers::{
        CreateDealerContractRequest, CreateDealerRequest, DealerContractList, DealerList,
        DealerSales, UpdateDealerContractRequest, UpdateDealerRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Dealer, DealerContract},
    response::ApiResponse,
    routes::params::{DateRangeQuery, PageQuery},
    services::dealer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dealers).post(create_dealer))
        .route(
            "/{id}",
            get(get_dealer).put(update_dealer).delete(delete_dealer),
        )
        .route(
            "/{id}/contracts",
            get(list_dealer_contracts).post(create_dealer_contract),
        )
        .route("/{id}/sales", get(dealer_sales))
}

pub fn contracts_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(get_dealer_contract).put(update_dealer_contract),
    )
}

#[utoipa::path(
    get,
    path = "/api/dealers",
    params(PageQuery),
    responses(
        (status = 200, description = "List dealers", body = ApiResponse<DealerList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn list_dealers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<DealerList>>> {
    let resp = dealer_service::list_dealers(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dealers/{id}",
    params(("id" = Uuid, Path, description = "Dealer ID")),
    responses(
        (status = 200, description = "Get dealer", body = ApiResponse<Dealer>),
        (status = 404, description = "Dealer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn get_dealer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Dealer>>> {
    let resp = dealer_service::get_dealer(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/dealers",
    request_body = CreateDealerRequest,
    responses(
        (status = 200, description = "Create dealer (admin only)", body = ApiResponse<Dealer>),
        (status = 409, description = "Email already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn create_dealer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateDealerRequest>,
) -> AppResult<Json<ApiResponse<Dealer>>> {
    let resp = dealer_service::create_dealer(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/dealers/{id}",
    params(("id" = Uuid, Path, description = "Dealer ID")),
    request_body = UpdateDealerRequest,
    responses(
        (status = 200, description = "Update dealer (admin only)", body = ApiResponse<Dealer>),
        (status = 404, description = "Dealer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn update_dealer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDealerRequest>,
) -> AppResult<Json<ApiResponse<Dealer>>> {
    let resp = dealer_service::update_dealer(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/dealers/{id}",
    params(("id" = Uuid, Path, description = "Dealer ID")),
    responses(
        (status = 200, description = "Delete dealer (admin only)"),
        (status = 409, description = "Dealer still has contracts, customers or orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn delete_dealer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = dealer_service::delete_dealer(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dealers/{id}/contracts",
    params(("id" = Uuid, Path, description = "Dealer ID")),
    responses(
        (status = 200, description = "Contracts of a dealer", body = ApiResponse<DealerContractList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn list_dealer_contracts(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DealerContractList>>> {
    let resp = dealer_service::list_dealer_contracts(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/dealers/{id}/contracts",
    params(("id" = Uuid, Path, description = "Dealer ID")),
    request_body = CreateDealerContractRequest,
    responses(
        (status = 200, description = "Sign a dealer contract", body = ApiResponse<DealerContract>),
        (status = 404, description = "Dealer or manufacturer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn create_dealer_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateDealerContractRequest>,
) -> AppResult<Json<ApiResponse<DealerContract>>> {
    let resp = dealer_service::create_dealer_contract(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dealers/{id}/sales",
    params(("id" = Uuid, Path, description = "Dealer ID"), DateRangeQuery),
    responses(
        (status = 200, description = "Total of completed sales", body = ApiResponse<DealerSales>)
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn dealer_sales(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<DealerSales>>> {
    let resp = dealer_service::dealer_total_sales(&state, &user, id, range).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dealer-contracts/{id}",
    params(("id" = Uuid, Path, description = "Dealer contract ID")),
    responses(
        (status = 200, description = "Get dealer contract", body = ApiResponse<DealerContract>),
        (status = 404, description = "Contract not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn get_dealer_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DealerContract>>> {
    let resp = dealer_service::get_dealer_contract(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/dealer-contracts/{id}",
    params(("id" = Uuid, Path, description = "Dealer contract ID")),
    request_body = UpdateDealerContractRequest,
    responses(
        (status = 200, description = "Update dealer contract", body = ApiResponse<DealerContract>),
        (status = 404, description = "Contract not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn update_dealer_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDealerContractRequest>,
) -> AppResult<Json<ApiResponse<DealerContract>>> {
    let resp = dealer_service::update_dealer_contract(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
