use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::sales::{CreateQuotationRequest, QuotationAccepted, QuotationList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Quotation,
    response::ApiResponse,
    routes::params::QuotationListQuery,
    services::sales_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotations).post(create_quotation))
        .route("/{id}", get(get_quotation))
        .route("/{id}/approve", post(approve_quotation))
        .route("/{id}/reject", post(reject_quotation))
        .route("/{id}/accept", post(accept_quotation))
}

#[utoipa::path(
    get,
    path = "/api/quotations",
    params(QuotationListQuery),
    responses(
        (status = 200, description = "Quotations visible to the caller", body = ApiResponse<QuotationList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn list_quotations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<QuotationListQuery>,
) -> AppResult<Json<ApiResponse<QuotationList>>> {
    let resp = sales_service::list_quotations(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/quotations",
    request_body = CreateQuotationRequest,
    responses(
        (status = 200, description = "Quote a price to a customer", body = ApiResponse<Quotation>),
        (status = 404, description = "Customer or variant not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn create_quotation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateQuotationRequest>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let resp = sales_service::create_quotation(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/quotations/{id}",
    params(("id" = Uuid, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Get quotation", body = ApiResponse<Quotation>),
        (status = 404, description = "Quotation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn get_quotation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let resp = sales_service::get_quotation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/quotations/{id}/approve",
    params(("id" = Uuid, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Approve a pending quotation", body = ApiResponse<Quotation>),
        (status = 409, description = "Quotation is not pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn approve_quotation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let resp = sales_service::approve_quotation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/quotations/{id}/reject",
    params(("id" = Uuid, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Reject a quotation", body = ApiResponse<Quotation>),
        (status = 409, description = "Quotation can no longer be rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn reject_quotation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let resp = sales_service::reject_quotation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/quotations/{id}/accept",
    params(("id" = Uuid, Path, description = "Quotation ID")),
    responses(
        (status = 200, description = "Accept an approved quotation and open an order", body = ApiResponse<QuotationAccepted>),
        (status = 409, description = "Quotation is not approved")
    ),
    security(("bearer_auth" = [])),
    tag = "Quotations"
)]
pub async fn accept_quotation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<QuotationAccepted>>> {
    let resp = sales_service::accept_quotation(&state, &user, id).await?;
    Ok(Json(resp))
}
