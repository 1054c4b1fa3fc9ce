use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::test_drives::{Availability, DaySchedule, ScheduleTestDriveRequest, TestDriveList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::TestDrive,
    response::ApiResponse,
    routes::params::{AvailabilityQuery, ScheduleQuery, TestDriveListQuery},
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_test_drives).post(schedule_test_drive))
        .route("/availability", get(check_availability))
        .route("/schedule", get(day_schedule))
        .route("/{id}", get(get_test_drive))
        .route("/{id}/confirm", post(confirm_test_drive))
        .route("/{id}/complete", post(complete_test_drive))
        .route("/{id}/cancel", post(cancel_test_drive))
}

#[utoipa::path(
    get,
    path = "/api/test-drives",
    params(TestDriveListQuery),
    responses(
        (status = 200, description = "Test drives visible to the caller", body = ApiResponse<TestDriveList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn list_test_drives(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TestDriveListQuery>,
) -> AppResult<Json<ApiResponse<TestDriveList>>> {
    let resp = customer_service::list_test_drives(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/test-drives",
    request_body = ScheduleTestDriveRequest,
    responses(
        (status = 200, description = "Book a test drive", body = ApiResponse<TestDrive>),
        (status = 400, description = "Date in the past"),
        (status = 404, description = "Customer or variant not found"),
        (status = 409, description = "Slot already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn schedule_test_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ScheduleTestDriveRequest>,
) -> AppResult<Json<ApiResponse<TestDrive>>> {
    let resp = customer_service::schedule_test_drive(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/test-drives/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Whether a slot can be booked", body = ApiResponse<Availability>)
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn check_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<Availability>>> {
    let resp = customer_service::check_availability(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/test-drives/schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Bookings on one day, by time", body = ApiResponse<DaySchedule>)
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn day_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<ApiResponse<DaySchedule>>> {
    let resp = customer_service::test_drive_schedule(&state, &user, query.date).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/test-drives/{id}",
    params(("id" = Uuid, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Get test drive", body = ApiResponse<TestDrive>),
        (status = 404, description = "Test drive not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn get_test_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestDrive>>> {
    let resp = customer_service::get_test_drive(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/test-drives/{id}/confirm",
    params(("id" = Uuid, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Confirm a scheduled test drive", body = ApiResponse<TestDrive>),
        (status = 409, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn confirm_test_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestDrive>>> {
    let resp = customer_service::confirm_test_drive(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/test-drives/{id}/complete",
    params(("id" = Uuid, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Mark a confirmed test drive as done", body = ApiResponse<TestDrive>),
        (status = 409, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn complete_test_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestDrive>>> {
    let resp = customer_service::complete_test_drive(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/test-drives/{id}/cancel",
    params(("id" = Uuid, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Cancel an active test drive", body = ApiResponse<TestDrive>),
        (status = 409, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Test drives"
)]
pub async fn cancel_test_drive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TestDrive>>> {
    let resp = customer_service::cancel_test_drive(&state, &user, id).await?;
    Ok(Json(resp))
}
