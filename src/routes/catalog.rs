use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::vehicles::{
        CreateManufacturerRequest, CreateVariantRequest, CreateVehicleModelRequest,
        ManufacturerList, UpdateManufacturerRequest, UpdateVariantRequest,
        UpdateVehicleModelRequest, VariantDetail, VariantList, VehicleModelDetail,
        VehicleModelList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Manufacturer, VehicleModel, VehicleVariant},
    response::ApiResponse,
    routes::params::{VariantQuery, VehicleModelQuery},
    services::vehicle_service,
    state::AppState,
};

pub fn manufacturers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/{id}",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
}

pub fn vehicle_models_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicle_models).post(create_vehicle_model))
        .route(
            "/{id}",
            get(get_vehicle_model)
                .put(update_vehicle_model)
                .delete(delete_vehicle_model),
        )
}

pub fn variants_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_variants).post(create_variant))
        .route(
            "/{id}",
            get(get_variant).put(update_variant).delete(delete_variant),
        )
}

#[utoipa::path(
    get,
    path = "/api/manufacturers",
    responses(
        (status = 200, description = "Manufacturers with model counts", body = ApiResponse<ManufacturerList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ManufacturerList>>> {
    let resp = vehicle_service::list_manufacturers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/manufacturers/{id}",
    params(("id" = Uuid, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Get manufacturer", body = ApiResponse<Manufacturer>),
        (status = 404, description = "Manufacturer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Manufacturer>>> {
    let resp = vehicle_service::get_manufacturer(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/manufacturers",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 200, description = "Create manufacturer", body = ApiResponse<Manufacturer>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateManufacturerRequest>,
) -> AppResult<Json<ApiResponse<Manufacturer>>> {
    let resp = vehicle_service::create_manufacturer(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/manufacturers/{id}",
    params(("id" = Uuid, Path, description = "Manufacturer ID")),
    request_body = UpdateManufacturerRequest,
    responses(
        (status = 200, description = "Update manufacturer", body = ApiResponse<Manufacturer>),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateManufacturerRequest>,
) -> AppResult<Json<ApiResponse<Manufacturer>>> {
    let resp = vehicle_service::update_manufacturer(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/manufacturers/{id}",
    params(("id" = Uuid, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Delete manufacturer"),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Manufacturer still has vehicle models")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = vehicle_service::delete_manufacturer(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vehicle-models",
    params(VehicleModelQuery),
    responses(
        (status = 200, description = "Search vehicle models", body = ApiResponse<VehicleModelList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_vehicle_models(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<VehicleModelQuery>,
) -> AppResult<Json<ApiResponse<VehicleModelList>>> {
    let resp = vehicle_service::list_vehicle_models(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vehicle-models/{id}",
    params(("id" = Uuid, Path, description = "Vehicle model ID")),
    responses(
        (status = 200, description = "Get vehicle model", body = ApiResponse<VehicleModelDetail>),
        (status = 404, description = "Vehicle model not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_vehicle_model(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VehicleModelDetail>>> {
    let resp = vehicle_service::get_vehicle_model(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vehicle-models",
    request_body = CreateVehicleModelRequest,
    responses(
        (status = 200, description = "Create vehicle model", body = ApiResponse<VehicleModel>),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Name already used by this manufacturer")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_vehicle_model(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVehicleModelRequest>,
) -> AppResult<Json<ApiResponse<VehicleModel>>> {
    let resp = vehicle_service::create_vehicle_model(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/vehicle-models/{id}",
    params(("id" = Uuid, Path, description = "Vehicle model ID")),
    request_body = UpdateVehicleModelRequest,
    responses(
        (status = 200, description = "Update vehicle model", body = ApiResponse<VehicleModel>),
        (status = 404, description = "Vehicle model or manufacturer not found"),
        (status = 409, description = "Name already used by this manufacturer")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_vehicle_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleModelRequest>,
) -> AppResult<Json<ApiResponse<VehicleModel>>> {
    let resp = vehicle_service::update_vehicle_model(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/vehicle-models/{id}",
    params(("id" = Uuid, Path, description = "Vehicle model ID")),
    responses(
        (status = 200, description = "Delete vehicle model"),
        (status = 409, description = "Vehicle model still has variants")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_vehicle_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = vehicle_service::delete_vehicle_model(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/variants",
    params(VariantQuery),
    responses(
        (status = 200, description = "Search variants", body = ApiResponse<VariantList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_variants(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<VariantQuery>,
) -> AppResult<Json<ApiResponse<VariantList>>> {
    let resp = vehicle_service::list_variants(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/variants/{id}",
    params(("id" = Uuid, Path, description = "Variant ID")),
    responses(
        (status = 200, description = "Variant with model and manufacturer names", body = ApiResponse<VariantDetail>),
        (status = 404, description = "Variant not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_variant(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VariantDetail>>> {
    let resp = vehicle_service::get_variant(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/variants",
    request_body = CreateVariantRequest,
    responses(
        (status = 200, description = "Create variant", body = ApiResponse<VehicleVariant>),
        (status = 404, description = "Vehicle model not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_variant(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVariantRequest>,
) -> AppResult<Json<ApiResponse<VehicleVariant>>> {
    let resp = vehicle_service::create_variant(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/variants/{id}",
    params(("id" = Uuid, Path, description = "Variant ID")),
    request_body = UpdateVariantRequest,
    responses(
        (status = 200, description = "Update variant", body = ApiResponse<VehicleVariant>),
        (status = 404, description = "Variant or model not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_variant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVariantRequest>,
) -> AppResult<Json<ApiResponse<VehicleVariant>>> {
    let resp = vehicle_service::update_variant(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/variants/{id}",
    params(("id" = Uuid, Path, description = "Variant ID")),
    responses(
        (status = 200, description = "Delete variant"),
        (status = 409, description = "Variant is still referenced")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = vehicle_service::delete_variant(&state, &user, id).await?;
    Ok(Json(resp))
}
