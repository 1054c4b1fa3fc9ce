use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Dealer, DealerContract};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateDealerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateDealerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DealerList {
    pub items: Vec<Dealer>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateDealerContractRequest {
    pub manufacturer_id: Uuid,
    #[validate(range(min = 0))]
    pub target_sales: Option<i64>,
    #[validate(range(min = 0))]
    pub credit_limit: Option<i64>,
    pub signed_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateDealerContractRequest {
    #[validate(range(min = 0))]
    pub target_sales: Option<i64>,
    #[validate(range(min = 0))]
    pub credit_limit: Option<i64>,
    pub signed_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DealerContractList {
    pub items: Vec<DealerContract>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DealerSales {
    pub dealer_id: Uuid,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total_sales: i64,
}
