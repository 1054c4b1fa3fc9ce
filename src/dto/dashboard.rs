use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub manufacturers: u64,
    pub dealers: u64,
    pub vehicle_models: u64,
    pub users: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvmDashboard {
    pub variants: u64,
    pub vehicle_models: u64,
    pub dealers: u64,
    pub manufacturers: u64,
    pub dealer_contracts: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DealerDashboard {
    pub customers: u64,
    pub active_orders: u64,
    pub test_drives: u64,
    pub pending_quotations: u64,
    pub total_sales: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDashboard {
    pub orders: u64,
    pub approved_quotations: u64,
    pub upcoming_test_drives: u64,
    pub outstanding_balance: i64,
}

/// Role-specific landing summary.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "role")]
pub enum Dashboard {
    Admin(AdminDashboard),
    EvmStaff(EvmDashboard),
    DealerStaff(DealerDashboard),
    Customer(CustomerDashboard),
}
