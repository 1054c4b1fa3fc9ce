use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    audit_logs, customers, dealer_contracts, dealers, feedbacks, manufacturers,
    orders::{self, OrderStatus},
    payments,
    quotations::{self, QuotationStatus},
    sales_contracts,
    test_drives::{self, TestDriveStatus},
    users::{self, Role},
    vehicle_models, vehicle_variants,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub dealer_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            role: model.role,
            dealer_id: model.dealer_id,
            manufacturer_id: model.manufacturer_id,
            customer_id: model.customer_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dealer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<dealers::Model> for Dealer {
    fn from(model: dealers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DealerContract {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub manufacturer_id: Uuid,
    pub target_sales: Option<i64>,
    pub credit_limit: Option<i64>,
    pub signed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<dealer_contracts::Model> for DealerContract {
    fn from(model: dealer_contracts::Model) -> Self {
        Self {
            id: model.id,
            dealer_id: model.dealer_id,
            manufacturer_id: model.manufacturer_id,
            target_sales: model.target_sales,
            credit_limit: model.credit_limit,
            signed_date: model.signed_date,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Manufacturer {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<manufacturers::Model> for Manufacturer {
    fn from(model: manufacturers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            country: model.country,
            address: model.address,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleModel {
    pub id: Uuid,
    pub manufacturer_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<vehicle_models::Model> for VehicleModel {
    fn from(model: vehicle_models::Model) -> Self {
        Self {
            id: model.id,
            manufacturer_id: model.manufacturer_id,
            name: model.name,
            category: model.category,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleVariant {
    pub id: Uuid,
    pub model_id: Uuid,
    pub version: String,
    pub color: Option<String>,
    pub product_year: Option<i32>,
    pub price: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<vehicle_variants::Model> for VehicleVariant {
    fn from(model: vehicle_variants::Model) -> Self {
        Self {
            id: model.id,
            model_id: model.model_id,
            version: model.version,
            color: model.color,
            product_year: model.product_year,
            price: model.price,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            dealer_id: model.dealer_id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            birthday: model.birthday,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quotation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    pub dealer_id: Uuid,
    pub price: i64,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<quotations::Model> for Quotation {
    fn from(model: quotations::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            variant_id: model.variant_id,
            dealer_id: model.dealer_id,
            price: model.price,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    pub quotation_id: Option<Uuid>,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            dealer_id: model.dealer_id,
            customer_id: model.customer_id,
            variant_id: model.variant_id,
            quotation_id: model.quotation_id,
            status: model.status,
            order_date: model.order_date,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub paid_at: DateTime<Utc>,
}

impl From<payments::Model> for Payment {
    fn from(model: payments::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            amount: model.amount,
            method: model.method,
            status: model.status,
            paid_at: model.paid_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalesContract {
    pub id: Uuid,
    pub order_id: Uuid,
    pub contract_date: NaiveDate,
    pub signed_date: Option<NaiveDate>,
    pub total_amount: i64,
    pub terms: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<sales_contracts::Model> for SalesContract {
    fn from(model: sales_contracts::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            contract_date: model.contract_date,
            signed_date: model.signed_date,
            total_amount: model.total_amount,
            terms: model.terms,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestDrive {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    pub scheduled_date: NaiveDate,
    #[schema(value_type = String, example = "09:30:00")]
    pub scheduled_time: NaiveTime,
    pub status: TestDriveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<test_drives::Model> for TestDrive {
    fn from(model: test_drives::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            variant_id: model.variant_id,
            scheduled_date: model.scheduled_date,
            scheduled_time: model.scheduled_time,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub content: Option<String>,
    pub rating: i32,
    pub feedback_date: DateTime<Utc>,
}

impl From<feedbacks::Model> for Feedback {
    fn from(model: feedbacks::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            content: model.content,
            rating: model.rating,
            feedback_date: model.feedback_date.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<audit_logs::Model> for AuditLog {
    fn from(model: audit_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            resource: model.resource,
            metadata: model.metadata,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
