use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Order, Payment, Quotation, SalesContract};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    /// Required for admins; dealer staff always order for their own dealer.
    pub dealer_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct RejectOrderRequest {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PaymentRequest {
    #[validate(range(min = 1, message = "payment amount must be positive"))]
    pub amount: i64,
    #[validate(length(min = 1, max = 50))]
    pub method: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub order: Order,
    pub remaining_balance: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentList {
    pub items: Vec<Payment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderBalance {
    pub order_id: Uuid,
    pub total: i64,
    pub paid: i64,
    /// Not clamped; negative only if payments ever exceeded the total.
    pub remaining_balance: i64,
    pub ready_for_delivery: bool,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSalesContractRequest {
    #[validate(range(min = 1, message = "contract total must be positive"))]
    pub total_amount: i64,
    #[validate(length(max = 4000))]
    pub terms: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignedContract {
    pub contract: SalesContract,
    pub order: Order,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateQuotationRequest {
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    #[validate(range(min = 1, message = "quoted price must be positive"))]
    pub price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuotationList {
    pub items: Vec<Quotation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuotationAccepted {
    pub quotation: Quotation,
    pub order: Order,
}
