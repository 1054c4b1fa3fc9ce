use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Customer, Feedback, Order, Payment, TestDrive};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    /// Required for admins; dealer staff always create under their own dealer.
    pub dealer_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerList {
    pub items: Vec<Customer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub orders: Vec<Order>,
    pub test_drives: Vec<TestDrive>,
    pub feedbacks: Vec<Feedback>,
    /// Sum of the totals of Completed orders.
    pub total_purchase_amount: i64,
    /// Unpaid balance across open orders.
    pub outstanding_balance: i64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentHistory {
    pub customer_id: Uuid,
    pub total_paid: i64,
    pub items: Vec<Payment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerCareReport {
    pub dealer_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_customers: u64,
    pub customers_with_orders: u64,
    pub test_drives: u64,
    pub feedback_count: u64,
    pub average_rating: Option<f64>,
    pub total_sales: i64,
    pub recent_feedbacks: Vec<Feedback>,
    pub generated_at: DateTime<Utc>,
}
