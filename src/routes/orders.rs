use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::sales::{
        CreateOrderRequest, CreateSalesContractRequest, OrderBalance, OrderList, PaymentList,
        PaymentReceipt, PaymentRequest, RejectOrderRequest, SignedContract,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Order, SalesContract},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::sales_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/pending", get(pending_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/confirm", post(confirm_order))
        .route("/{id}/reject", post(reject_order))
        .route("/{id}/payments", get(list_payments).post(pay_order))
        .route("/{id}/balance", get(order_balance))
        .route("/{id}/contract", get(get_contract).post(sign_contract))
        .route("/{id}/complete", post(complete_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders visible to the caller", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = sales_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Create order", body = ApiResponse<Order>),
        (status = 404, description = "Customer, dealer or variant not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = sales_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/pending",
    responses(
        (status = 200, description = "Pending orders of the caller's dealer", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn pending_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = sales_service::pending_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Get order", body = ApiResponse<Order>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = sales_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/confirm",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Confirm a pending order", body = ApiResponse<Order>),
        (status = 409, description = "Order is not pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn confirm_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = sales_service::confirm_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/reject",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = RejectOrderRequest,
    responses(
        (status = 200, description = "Reject a pending order", body = ApiResponse<Order>),
        (status = 409, description = "Order is not pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn reject_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = sales_service::reject_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/payments",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payments of an order", body = ApiResponse<PaymentList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PaymentList>>> {
    let resp = sales_service::list_payments(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/payments",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Record a payment", body = ApiResponse<PaymentReceipt>),
        (status = 400, description = "Invalid amount or overpayment"),
        (status = 409, description = "Order no longer accepts payments")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn pay_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentReceipt>>> {
    let resp = sales_service::process_payment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/balance",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Remaining balance and delivery readiness", body = ApiResponse<OrderBalance>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_balance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderBalance>>> {
    let resp = sales_service::get_balance(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/contract",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Sales contract of an order", body = ApiResponse<SalesContract>),
        (status = 404, description = "No contract for this order")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SalesContract>>> {
    let resp = sales_service::get_sales_contract(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/contract",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = CreateSalesContractRequest,
    responses(
        (status = 200, description = "Sign a sales contract", body = ApiResponse<SignedContract>),
        (status = 409, description = "Contract exists or order cannot be contracted")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn sign_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSalesContractRequest>,
) -> AppResult<Json<ApiResponse<SignedContract>>> {
    let resp = sales_service::create_sales_contract(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/complete",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Complete a fully paid order", body = ApiResponse<Order>),
        (status = 409, description = "Balance outstanding or transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn complete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = sales_service::complete_order(&state, &user, id).await?;
    Ok(Json(resp))
}
