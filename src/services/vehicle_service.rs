use std::collections::HashMap;

use sea_orm::Set;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::vehicles::{
        CreateManufacturerRequest, CreateVariantRequest, CreateVehicleModelRequest,
        ManufacturerList, ManufacturerSummary, UpdateManufacturerRequest, UpdateVariantRequest,
        UpdateVehicleModelRequest, VariantDetail, VariantList, VehicleModelDetail,
        VehicleModelList,
    },
    entity::{
        manufacturers::ActiveModel as ManufacturerActive,
        vehicle_models::ActiveModel as VehicleModelActive,
        vehicle_variants::{ActiveModel as VariantActive, Model as VariantModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_catalog_writer},
    models::{Manufacturer, VehicleModel, VehicleVariant},
    repositories::{
        manufacturers, orders, orders::OrderFilter, quotations, test_drives, variants,
        vehicle_models,
    },
    response::{ApiResponse, Meta},
    routes::params::{VariantQuery, VehicleModelQuery},
    state::AppState,
};

// Manufacturers

pub async fn list_manufacturers(state: &AppState) -> AppResult<ApiResponse<ManufacturerList>> {
    let counts = vehicle_models::counts_by_manufacturer(&state.orm).await?;
    let items: Vec<ManufacturerSummary> = manufacturers::list(&state.orm)
        .await?
        .into_iter()
        .map(|m| ManufacturerSummary {
            model_count: counts.get(&m.id).copied().unwrap_or(0),
            manufacturer: Manufacturer::from(m),
        })
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Manufacturers", ManufacturerList { items }, Some(meta)))
}

pub async fn get_manufacturer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Manufacturer>> {
    match manufacturers::find(&state.orm, id).await? {
        Some(m) => Ok(ApiResponse::success("Manufacturer", Manufacturer::from(m), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_manufacturer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateManufacturerRequest,
) -> AppResult<ApiResponse<Manufacturer>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    let name = payload.name.trim().to_string();
    if manufacturers::name_taken(&state.orm, &name, None).await? {
        return Err(AppError::Conflict(format!("Manufacturer '{name}' already exists")));
    }

    let manufacturer =
        manufacturers::insert(&state.orm, name, payload.country, payload.address).await?;
    audit::record(
        state,
        user,
        "manufacturer_create",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": manufacturer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Manufacturer created",
        Manufacturer::from(manufacturer),
        Some(Meta::empty()),
    ))
}

pub async fn update_manufacturer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateManufacturerRequest,
) -> AppResult<ApiResponse<Manufacturer>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    let existing = match manufacturers::find(&state.orm, id).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    let mut active: ManufacturerActive = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if manufacturers::name_taken(&state.orm, &name, Some(id)).await? {
            return Err(AppError::Conflict(format!("Manufacturer '{name}' already exists")));
        }
        active.name = Set(name);
    }
    if let Some(country) = payload.country {
        active.country = Set(Some(country));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    let manufacturer = manufacturers::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "manufacturer_update",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": manufacturer.id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Manufacturer updated",
        Manufacturer::from(manufacturer),
        Some(Meta::empty()),
    ))
}

/// Refused while any vehicle model still references the manufacturer.
pub async fn delete_manufacturer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_catalog_writer(user)?;
    let existing = match manufacturers::find(&state.orm, id).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    if vehicle_models::exists_for_manufacturer(&state.orm, id).await? {
        return Err(AppError::Conflict(
            "Manufacturer still has vehicle models".into(),
        ));
    }
    manufacturers::delete(&state.orm, existing).await?;

    audit::record(
        state,
        user,
        "manufacturer_delete",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Manufacturer deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

// Vehicle models

pub async fn list_vehicle_models(
    state: &AppState,
    query: VehicleModelQuery,
) -> AppResult<ApiResponse<VehicleModelList>> {
    let items: Vec<VehicleModelDetail> =
        vehicle_models::search(&state.orm, query.manufacturer_id, query.q.as_deref())
            .await?
            .into_iter()
            .map(|(model, manufacturer)| VehicleModelDetail {
                model: VehicleModel::from(model),
                manufacturer_name: manufacturer.map(|m| m.name),
            })
            .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Vehicle models", VehicleModelList { items }, Some(meta)))
}

pub async fn get_vehicle_model(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<VehicleModelDetail>> {
    let model = match vehicle_models::find(&state.orm, id).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let manufacturer = manufacturers::find(&state.orm, model.manufacturer_id).await?;
    Ok(ApiResponse::success(
        "Vehicle model",
        VehicleModelDetail {
            model: VehicleModel::from(model),
            manufacturer_name: manufacturer.map(|m| m.name),
        },
        None,
    ))
}

pub async fn create_vehicle_model(
    state: &AppState,
    user: &AuthUser,
    payload: CreateVehicleModelRequest,
) -> AppResult<ApiResponse<VehicleModel>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    if manufacturers::find(&state.orm, payload.manufacturer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let name = payload.name.trim().to_string();
    if vehicle_models::name_taken(&state.orm, payload.manufacturer_id, &name, None).await? {
        return Err(AppError::Conflict(format!("Model '{name}' already exists for this manufacturer")));
    }

    let model = vehicle_models::insert(
        &state.orm,
        payload.manufacturer_id,
        name,
        payload.category,
        payload.image_url,
    )
    .await?;
    audit::record(
        state,
        user,
        "vehicle_model_create",
        "vehicle_models",
        serde_json::json!({ "model_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success("Vehicle model created", VehicleModel::from(model), Some(Meta::empty())))
}

pub async fn update_vehicle_model(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateVehicleModelRequest,
) -> AppResult<ApiResponse<VehicleModel>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    let existing = match vehicle_models::find(&state.orm, id).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    let manufacturer_id = payload.manufacturer_id.unwrap_or(existing.manufacturer_id);
    if manufacturers::find(&state.orm, manufacturer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .unwrap_or_else(|| existing.name.clone());
    if vehicle_models::name_taken(&state.orm, manufacturer_id, &name, Some(id)).await? {
        return Err(AppError::Conflict(format!("Model '{name}' already exists for this manufacturer")));
    }

    let mut active: VehicleModelActive = existing.into();
    active.manufacturer_id = Set(manufacturer_id);
    active.name = Set(name);
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    let model = vehicle_models::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "vehicle_model_update",
        "vehicle_models",
        serde_json::json!({ "model_id": model.id }),
    )
    .await;
    Ok(ApiResponse::success("Vehicle model updated", VehicleModel::from(model), Some(Meta::empty())))
}

/// Refused while any variant still references the model.
pub async fn delete_vehicle_model(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_catalog_writer(user)?;
    let existing = match vehicle_models::find(&state.orm, id).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    if variants::exists_for_model(&state.orm, id).await? {
        return Err(AppError::Conflict("Vehicle model still has variants".into()));
    }
    vehicle_models::delete(&state.orm, existing).await?;

    audit::record(
        state,
        user,
        "vehicle_model_delete",
        "vehicle_models",
        serde_json::json!({ "model_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Vehicle model deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

// Variants

fn variant_detail(
    variant: VariantModel,
    model_name: Option<String>,
    manufacturer_name: Option<String>,
) -> VariantDetail {
    let available = variant.price > 0;
    VariantDetail {
        variant: VehicleVariant::from(variant),
        model_name,
        manufacturer_name,
        available,
    }
}

pub async fn list_variants(
    state: &AppState,
    query: VariantQuery,
) -> AppResult<ApiResponse<VariantList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let (rows, total) = variants::search(
        &state.orm,
        query.model_id,
        query.q.as_deref(),
        limit as u64,
        offset as u64,
    )
    .await?;

    let manufacturer_names: HashMap<Uuid, String> = manufacturers::list(&state.orm)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();
    let items = rows
        .into_iter()
        .map(|(variant, model)| {
            let manufacturer_name = model
                .as_ref()
                .and_then(|m| manufacturer_names.get(&m.manufacturer_id).cloned());
            variant_detail(variant, model.map(|m| m.name), manufacturer_name)
        })
        .collect();

    Ok(ApiResponse::success(
        "Variants",
        VariantList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

/// Variant with its model and manufacturer names, as used by the order and
/// booking forms.
pub async fn get_variant(state: &AppState, id: Uuid) -> AppResult<ApiResponse<VariantDetail>> {
    let variant = match variants::find(&state.orm, id).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    let model = vehicle_models::find(&state.orm, variant.model_id).await?;
    let manufacturer = match &model {
        Some(m) => manufacturers::find(&state.orm, m.manufacturer_id).await?,
        None => None,
    };
    Ok(ApiResponse::success(
        "Variant",
        variant_detail(variant, model.map(|m| m.name), manufacturer.map(|m| m.name)),
        None,
    ))
}

pub async fn create_variant(
    state: &AppState,
    user: &AuthUser,
    payload: CreateVariantRequest,
) -> AppResult<ApiResponse<VehicleVariant>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    if vehicle_models::find(&state.orm, payload.model_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let variant = variants::insert(
        &state.orm,
        variants::NewVariant {
            model_id: payload.model_id,
            version: payload.version.trim().to_string(),
            color: payload.color,
            product_year: payload.product_year,
            price: payload.price,
            quantity: payload.quantity.unwrap_or(0),
        },
    )
    .await?;
    audit::record(
        state,
        user,
        "variant_create",
        "vehicle_variants",
        serde_json::json!({ "variant_id": variant.id }),
    )
    .await;

    Ok(ApiResponse::success("Variant created", VehicleVariant::from(variant), Some(Meta::empty())))
}

pub async fn update_variant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateVariantRequest,
) -> AppResult<ApiResponse<VehicleVariant>> {
    ensure_catalog_writer(user)?;
    payload.validate()?;
    let existing = match variants::find(&state.orm, id).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    let mut active: VariantActive = existing.into();
    if let Some(model_id) = payload.model_id {
        if vehicle_models::find(&state.orm, model_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        active.model_id = Set(model_id);
    }
    if let Some(version) = payload.version {
        active.version = Set(version.trim().to_string());
    }
    if let Some(color) = payload.color {
        active.color = Set(Some(color));
    }
    if let Some(product_year) = payload.product_year {
        active.product_year = Set(Some(product_year));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    let variant = variants::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "variant_update",
        "vehicle_variants",
        serde_json::json!({ "variant_id": variant.id }),
    )
    .await;
    Ok(ApiResponse::success("Variant updated", VehicleVariant::from(variant), Some(Meta::empty())))
}

/// Refused while orders, quotations or test drives reference the variant.
pub async fn delete_variant(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_catalog_writer(user)?;
    let existing = match variants::find(&state.orm, id).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    let referenced = orders::exists(
        &state.orm,
        &OrderFilter {
            variant_id: Some(id),
            ..Default::default()
        },
    )
    .await?
        || quotations::exists_for_variant(&state.orm, id).await?
        || test_drives::exists_for_variant(&state.orm, id).await?;
    if referenced {
        return Err(AppError::Conflict(
            "Variant is referenced by orders, quotations or test drives".into(),
        ));
    }
    variants::delete(&state.orm, existing).await?;

    audit::record(
        state,
        user,
        "variant_delete",
        "vehicle_variants",
        serde_json::json!({ "variant_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Variant deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}
