use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::feedbacks::{CreateFeedbackRequest, FeedbackList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Feedback,
    response::ApiResponse,
    routes::params::FeedbackQuery,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_feedbacks).post(create_feedback))
}

#[utoipa::path(
    get,
    path = "/api/feedbacks",
    params(FeedbackQuery),
    responses(
        (status = 200, description = "Feedback visible to the caller", body = ApiResponse<FeedbackList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn list_feedbacks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FeedbackQuery>,
) -> AppResult<Json<ApiResponse<FeedbackList>>> {
    let resp = customer_service::list_feedbacks(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/feedbacks",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 200, description = "Leave feedback", body = ApiResponse<Feedback>),
        (status = 400, description = "Rating outside 1..5 or content too long")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<Json<ApiResponse<Feedback>>> {
    let resp = customer_service::create_feedback(&state, &user, payload).await?;
    Ok(Json(resp))
}
