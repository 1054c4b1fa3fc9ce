use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::TestDrive;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ScheduleTestDriveRequest {
    /// Customers book for themselves; staff must name the customer.
    pub customer_id: Option<Uuid>,
    pub variant_id: Uuid,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:30:00")]
    pub time: NaiveTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Availability {
    pub available: bool,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestDriveList {
    pub items: Vec<TestDrive>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub items: Vec<TestDrive>,
}
