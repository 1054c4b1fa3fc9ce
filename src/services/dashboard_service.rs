use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::dashboard::{
        AdminDashboard, CustomerDashboard, Dashboard, DealerDashboard, EvmDashboard,
    },
    entity::{orders::OrderStatus, quotations::QuotationStatus, users::Role},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    repositories::{
        customers, dealer_contracts, dealers, manufacturers,
        orders::{self, OrderFilter},
        quotations::{self, QuotationFilter},
        test_drives::{self, TestDriveFilter},
        users, variants, vehicle_models,
    },
    response::ApiResponse,
    state::AppState,
};

/// Orders still moving through the sales pipeline.
const ACTIVE_ORDER_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::ContractSigned,
    OrderStatus::Paid,
];

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    let data = match user.role {
        Role::Admin => Dashboard::Admin(admin_summary(state).await?),
        Role::EvmStaff => Dashboard::EvmStaff(evm_summary(state).await?),
        Role::DealerStaff => {
            let dealer_id = user.dealer_id.ok_or(AppError::Forbidden)?;
            Dashboard::DealerStaff(dealer_summary(state, dealer_id).await?)
        }
        Role::Customer => {
            let customer_id = user.customer_id.ok_or(AppError::Forbidden)?;
            Dashboard::Customer(customer_summary(state, customer_id).await?)
        }
    };
    Ok(ApiResponse::success("Dashboard", data, None))
}

async fn admin_summary(state: &AppState) -> AppResult<AdminDashboard> {
    Ok(AdminDashboard {
        manufacturers: manufacturers::count(&state.orm).await?,
        dealers: dealers::count(&state.orm).await?,
        vehicle_models: vehicle_models::count(&state.orm).await?,
        users: users::count(&state.orm).await?,
    })
}

async fn evm_summary(state: &AppState) -> AppResult<EvmDashboard> {
    Ok(EvmDashboard {
        variants: variants::count(&state.orm).await?,
        vehicle_models: vehicle_models::count(&state.orm).await?,
        dealers: dealers::count(&state.orm).await?,
        manufacturers: manufacturers::count(&state.orm).await?,
        dealer_contracts: dealer_contracts::count(&state.orm).await?,
    })
}

async fn dealer_summary(state: &AppState, dealer_id: Uuid) -> AppResult<DealerDashboard> {
    let active_orders = OrderFilter::for_dealer(dealer_id).with_statuses(&ACTIVE_ORDER_STATUSES);
    let test_drive_filter = TestDriveFilter {
        dealer_id: Some(dealer_id),
        ..Default::default()
    };
    let pending_quotations = QuotationFilter {
        dealer_id: Some(dealer_id),
        status: Some(QuotationStatus::Pending),
        ..Default::default()
    };

    Ok(DealerDashboard {
        customers: customers::count_for_dealer(&state.orm, dealer_id).await?,
        active_orders: orders::count(&state.orm, &active_orders).await?,
        test_drives: test_drives::count(&state.orm, &test_drive_filter).await?,
        pending_quotations: quotations::count(&state.orm, &pending_quotations).await?,
        total_sales: orders::completed_sales_total(&state.orm, Some(dealer_id), None, None, None)
            .await?,
    })
}

async fn customer_summary(state: &AppState, customer_id: Uuid) -> AppResult<CustomerDashboard> {
    let approved = QuotationFilter {
        customer_id: Some(customer_id),
        status: Some(QuotationStatus::Approved),
        ..Default::default()
    };
    let upcoming = TestDriveFilter {
        customer_id: Some(customer_id),
        active_only: true,
        from: Some(Utc::now().date_naive()),
        ..Default::default()
    };

    Ok(CustomerDashboard {
        orders: orders::count(&state.orm, &OrderFilter::for_customer(customer_id)).await?,
        approved_quotations: quotations::count(&state.orm, &approved).await?,
        upcoming_test_drives: test_drives::count(&state.orm, &upcoming).await?,
        outstanding_balance: orders::outstanding_balance(&state.orm, customer_id).await?,
    })
}
