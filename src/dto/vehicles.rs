use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Manufacturer, VehicleModel, VehicleVariant};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateManufacturerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateManufacturerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManufacturerSummary {
    #[serde(flatten)]
    pub manufacturer: Manufacturer,
    pub model_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManufacturerList {
    pub items: Vec<ManufacturerSummary>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateVehicleModelRequest {
    pub manufacturer_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateVehicleModelRequest {
    pub manufacturer_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleModelDetail {
    #[serde(flatten)]
    pub model: VehicleModel,
    pub manufacturer_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleModelList {
    pub items: Vec<VehicleModelDetail>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateVariantRequest {
    pub model_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub version: String,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub product_year: Option<i32>,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateVariantRequest {
    pub model_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50))]
    pub version: Option<String>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub product_year: Option<i32>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariantDetail {
    #[serde(flatten)]
    pub variant: VehicleVariant,
    pub model_name: Option<String>,
    pub manufacturer_name: Option<String>,
    /// A variant can be sold once it has a positive price.
    pub available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariantList {
    pub items: Vec<VariantDetail>,
}
