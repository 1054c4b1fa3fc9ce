use sea_orm::{ConnectionTrait, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::sales::{
        CreateOrderRequest, CreateQuotationRequest, CreateSalesContractRequest, OrderBalance,
        OrderList, PaymentList, PaymentReceipt, PaymentRequest, QuotationAccepted, QuotationList,
        RejectOrderRequest, SignedContract,
    },
    entity::{
        orders::{Model as OrderModel, OrderStatus},
        quotations::{Model as QuotationModel, QuotationStatus},
        users::Role,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_any_role},
    models::{Order, Payment, Quotation, SalesContract},
    repositories::{
        customers, dealers, orders, orders::OrderFilter, payments, quotations,
        quotations::QuotationFilter, sales_contracts, variants,
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, QuotationListQuery},
    state::AppState,
};

const SALES_ROLES: [Role; 2] = [Role::Admin, Role::DealerStaff];

/// Amount still owed; not clamped at zero.
pub fn remaining_balance(total: i64, paid: i64) -> i64 {
    total - paid
}

/// An order is handed over once nothing is owed.
pub fn is_ready_for_delivery(remaining: i64) -> bool {
    remaining <= 0
}

/// The price the customer owes: the signed contract amount, else the variant list price.
pub async fn order_total<C: ConnectionTrait>(conn: &C, order: &OrderModel) -> AppResult<i64> {
    if let Some(contract) = sales_contracts::find_by_order(conn, order.id).await? {
        return Ok(contract.total_amount);
    }
    match variants::find(conn, order.variant_id).await? {
        Some(variant) => Ok(variant.price),
        None => Err(AppError::NotFound),
    }
}

pub async fn balance_of<C: ConnectionTrait>(conn: &C, order: &OrderModel) -> AppResult<OrderBalance> {
    let total = order_total(conn, order).await?;
    let paid = payments::total_paid_for_order(conn, order.id).await?;
    let remaining = remaining_balance(total, paid);
    Ok(OrderBalance {
        order_id: order.id,
        total,
        paid,
        remaining_balance: remaining,
        ready_for_delivery: is_ready_for_delivery(remaining),
    })
}

fn transition_error(order: &OrderModel, next: OrderStatus) -> AppError {
    AppError::invalid_state(format!(
        "Order is {} and cannot move to {}",
        order.status.label(),
        next.label()
    ))
}

/// Loads an order the principal may see. Out-of-scope orders read as missing.
async fn visible_order<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
    lock: bool,
) -> AppResult<OrderModel> {
    let scope = user.scope()?;
    let order = if lock {
        orders::find_for_update(conn, id).await?
    } else {
        orders::find(conn, id).await?
    };
    match order {
        Some(o) if scope.allows(o.dealer_id, o.customer_id) => Ok(o),
        _ => Err(AppError::NotFound),
    }
}

async fn visible_quotation<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
    lock: bool,
) -> AppResult<QuotationModel> {
    let scope = user.scope()?;
    let quotation = if lock {
        quotations::find_for_update(conn, id).await?
    } else {
        quotations::find(conn, id).await?
    };
    match quotation {
        Some(q) if scope.allows(q.dealer_id, q.customer_id) => Ok(q),
        _ => Err(AppError::NotFound),
    }
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(user, &SALES_ROLES)?;
    payload.validate()?;

    let dealer_id = match (user.role, user.dealer_id, payload.dealer_id) {
        (Role::DealerStaff, Some(own), _) => own,
        (Role::Admin, _, Some(id)) => id,
        (Role::Admin, _, None) => return Err(AppError::bad_request("dealer_id is required")),
        _ => return Err(AppError::Forbidden),
    };

    if dealers::find(&state.orm, dealer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let customer = match customers::find(&state.orm, payload.customer_id).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    if customer.dealer_id != dealer_id {
        return Err(AppError::bad_request("Customer does not belong to this dealer"));
    }
    if variants::find(&state.orm, payload.variant_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let order = orders::insert(&state.orm, dealer_id, customer.id, payload.variant_id, None).await?;
    tracing::info!(order_id = %order.id, dealer_id = %dealer_id, "order created");
    audit::record(
        state,
        user,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success("Order created", Order::from(order), Some(Meta::empty())))
}

pub async fn get_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = visible_order(&state.orm, user, id, false).await?;
    Ok(ApiResponse::success("OK", Order::from(order), Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let scope = user.scope()?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut filter = OrderFilter {
        dealer_id: scope.dealer_id(),
        customer_id: scope.customer_id(),
        ..Default::default()
    };
    if let Some(status) = query.status {
        filter.statuses = vec![status];
    }

    let (items, total) = orders::list(&state.orm, &filter, limit as u64, offset as u64).await?;
    let items = items.into_iter().map(Order::from).collect();
    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

/// Orders waiting for a dealer decision.
pub async fn pending_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    ensure_any_role(user, &SALES_ROLES)?;
    let scope = user.scope()?;
    let filter = OrderFilter {
        dealer_id: scope.dealer_id(),
        ..Default::default()
    }
    .with_statuses(&[OrderStatus::Pending]);

    let items: Vec<Order> = orders::list_all(&state.orm, &filter)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

async fn decide_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    next: OrderStatus,
    reason: Option<String>,
) -> AppResult<OrderModel> {
    ensure_any_role(user, &SALES_ROLES)?;
    let txn = state.orm.begin().await?;
    let order = visible_order(&txn, user, id, true).await?;
    if order.status != OrderStatus::Pending {
        return Err(transition_error(&order, next));
    }
    let order = orders::set_status(&txn, order, next).await?;
    txn.commit().await?;

    tracing::info!(order_id = %order.id, status = next.label(), "order decided");
    audit::record(
        state,
        user,
        if next == OrderStatus::Confirmed { "order_confirm" } else { "order_reject" },
        "orders",
        serde_json::json!({ "order_id": order.id, "reason": reason }),
    )
    .await;
    Ok(order)
}

pub async fn confirm_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = decide_order(state, user, id, OrderStatus::Confirmed, None).await?;
    Ok(ApiResponse::success("Order confirmed", Order::from(order), Some(Meta::empty())))
}

pub async fn reject_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RejectOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    payload.validate()?;
    let order = decide_order(state, user, id, OrderStatus::Rejected, payload.reason).await?;
    Ok(ApiResponse::success("Order rejected", Order::from(order), Some(Meta::empty())))
}

/// Records a payment under a row lock on the order. A payment that settles a
/// Confirmed or ContractSigned order moves it to Paid in the same transaction.
pub async fn process_payment(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    payload: PaymentRequest,
) -> AppResult<ApiResponse<PaymentReceipt>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let order = visible_order(&txn, user, order_id, true).await?;
    if order.status.is_terminal() {
        return Err(AppError::invalid_state(format!(
            "Order is {} and no longer accepts payments",
            order.status.label()
        )));
    }

    let balance = balance_of(&txn, &order).await?;
    if payload.amount > balance.remaining_balance {
        return Err(AppError::bad_request(format!(
            "Payment of {} exceeds the remaining balance of {}",
            payload.amount, balance.remaining_balance
        )));
    }

    let payment = payments::insert(&txn, order.id, payload.amount, payload.method.trim()).await?;
    let remaining = remaining_balance(balance.remaining_balance, payload.amount);

    let settles = is_ready_for_delivery(remaining)
        && matches!(order.status, OrderStatus::Confirmed | OrderStatus::ContractSigned);
    let order = if settles {
        orders::set_status(&txn, order, OrderStatus::Paid).await?
    } else {
        order
    };
    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        amount = payment.amount,
        remaining,
        status = order.status.label(),
        "payment recorded"
    );
    audit::record(
        state,
        user,
        "payment_create",
        "payments",
        serde_json::json!({ "order_id": order.id, "payment_id": payment.id, "amount": payment.amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment recorded",
        PaymentReceipt {
            payment: Payment::from(payment),
            order: Order::from(order),
            remaining_balance: remaining,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_payments(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<PaymentList>> {
    let order = visible_order(&state.orm, user, order_id, false).await?;
    let items: Vec<Payment> = payments::list_for_order(&state.orm, order.id)
        .await?
        .into_iter()
        .map(Payment::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", PaymentList { items }, Some(meta)))
}

pub async fn get_balance(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<OrderBalance>> {
    let order = visible_order(&state.orm, user, order_id, false).await?;
    let balance = balance_of(&state.orm, &order).await?;
    Ok(ApiResponse::success("OK", balance, Some(Meta::empty())))
}

/// Draws up the contract, moves the order to ContractSigned and, when the
/// order came from an accepted quotation, marks that quotation signed too.
pub async fn create_sales_contract(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    payload: CreateSalesContractRequest,
) -> AppResult<ApiResponse<SignedContract>> {
    ensure_any_role(user, &SALES_ROLES)?;
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let order = visible_order(&txn, user, order_id, true).await?;
    if sales_contracts::find_by_order(&txn, order.id).await?.is_some() {
        return Err(AppError::Conflict("Order already has a sales contract".into()));
    }
    if !order.status.can_transition_to(OrderStatus::ContractSigned) {
        return Err(transition_error(&order, OrderStatus::ContractSigned));
    }

    let contract = sales_contracts::insert(&txn, order.id, payload.total_amount, payload.terms).await?;
    let quotation_id = order.quotation_id;
    let order = orders::set_status(&txn, order, OrderStatus::ContractSigned).await?;

    if let Some(quotation_id) = quotation_id {
        if let Some(quotation) = quotations::find_for_update(&txn, quotation_id).await? {
            if quotation.status.can_transition_to(QuotationStatus::ContractSigned) {
                quotations::set_status(&txn, quotation, QuotationStatus::ContractSigned).await?;
            }
        }
    }
    txn.commit().await?;

    tracing::info!(order_id = %order.id, contract_id = %contract.id, "sales contract signed");
    audit::record(
        state,
        user,
        "contract_create",
        "sales_contracts",
        serde_json::json!({ "order_id": order.id, "contract_id": contract.id, "total_amount": contract.total_amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Sales contract created",
        SignedContract {
            contract: SalesContract::from(contract),
            order: Order::from(order),
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_sales_contract(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<SalesContract>> {
    let order = visible_order(&state.orm, user, order_id, false).await?;
    match sales_contracts::find_by_order(&state.orm, order.id).await? {
        Some(contract) => Ok(ApiResponse::success(
            "OK",
            SalesContract::from(contract),
            Some(Meta::empty()),
        )),
        None => Err(AppError::NotFound),
    }
}

/// Fails while any balance is outstanding.
pub async fn complete_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(user, &SALES_ROLES)?;
    let txn = state.orm.begin().await?;
    let order = visible_order(&txn, user, id, true).await?;
    if !order.status.can_transition_to(OrderStatus::Completed) {
        return Err(transition_error(&order, OrderStatus::Completed));
    }
    let balance = balance_of(&txn, &order).await?;
    if !balance.ready_for_delivery {
        return Err(AppError::invalid_state(format!(
            "Order still has an outstanding balance of {}",
            balance.remaining_balance
        )));
    }
    let order = orders::set_status(&txn, order, OrderStatus::Completed).await?;
    txn.commit().await?;

    tracing::info!(order_id = %order.id, "order completed");
    audit::record(
        state,
        user,
        "order_complete",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success("Order completed", Order::from(order), Some(Meta::empty())))
}

pub async fn create_quotation(
    state: &AppState,
    user: &AuthUser,
    payload: CreateQuotationRequest,
) -> AppResult<ApiResponse<Quotation>> {
    ensure_any_role(user, &SALES_ROLES)?;
    payload.validate()?;

    let customer = match customers::find(&state.orm, payload.customer_id).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    if user.role == Role::DealerStaff && user.dealer_id != Some(customer.dealer_id) {
        return Err(AppError::NotFound);
    }
    if variants::find(&state.orm, payload.variant_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let quotation = quotations::insert(
        &state.orm,
        customer.id,
        payload.variant_id,
        customer.dealer_id,
        payload.price,
    )
    .await?;
    audit::record(
        state,
        user,
        "quotation_create",
        "quotations",
        serde_json::json!({ "quotation_id": quotation.id, "price": quotation.price }),
    )
    .await;

    Ok(ApiResponse::success("Quotation created", Quotation::from(quotation), Some(Meta::empty())))
}

pub async fn get_quotation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Quotation>> {
    let quotation = visible_quotation(&state.orm, user, id, false).await?;
    Ok(ApiResponse::success("OK", Quotation::from(quotation), Some(Meta::empty())))
}

pub async fn list_quotations(
    state: &AppState,
    user: &AuthUser,
    query: QuotationListQuery,
) -> AppResult<ApiResponse<QuotationList>> {
    let scope = user.scope()?;
    let (page, limit, offset) = query.pagination().normalize();
    let filter = QuotationFilter {
        dealer_id: scope.dealer_id(),
        customer_id: scope.customer_id(),
        status: query.status,
    };
    let (items, total) = quotations::list(&state.orm, &filter, limit as u64, offset as u64).await?;
    let items = items.into_iter().map(Quotation::from).collect();
    Ok(ApiResponse::success(
        "OK",
        QuotationList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

async fn move_quotation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    next: QuotationStatus,
) -> AppResult<QuotationModel> {
    ensure_any_role(user, &SALES_ROLES)?;
    let txn = state.orm.begin().await?;
    let quotation = visible_quotation(&txn, user, id, true).await?;
    if !quotation.status.can_transition_to(next) {
        return Err(AppError::invalid_state(format!(
            "Quotation is {:?} and cannot move to {:?}",
            quotation.status, next
        )));
    }
    let quotation = quotations::set_status(&txn, quotation, next).await?;
    txn.commit().await?;

    audit::record(
        state,
        user,
        "quotation_status",
        "quotations",
        serde_json::json!({ "quotation_id": quotation.id, "status": quotation.status }),
    )
    .await;
    Ok(quotation)
}

pub async fn approve_quotation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Quotation>> {
    let quotation = move_quotation(state, user, id, QuotationStatus::Approved).await?;
    Ok(ApiResponse::success("Quotation approved", Quotation::from(quotation), Some(Meta::empty())))
}

pub async fn reject_quotation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Quotation>> {
    let quotation = move_quotation(state, user, id, QuotationStatus::Rejected).await?;
    Ok(ApiResponse::success("Quotation rejected", Quotation::from(quotation), Some(Meta::empty())))
}

/// Turns an approved quotation into a Pending order in one transaction.
pub async fn accept_quotation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<QuotationAccepted>> {
    let txn = state.orm.begin().await?;
    let quotation = visible_quotation(&txn, user, id, true).await?;
    if quotation.status != QuotationStatus::Approved {
        return Err(AppError::invalid_state(format!(
            "Quotation is {:?}; only approved quotations can be accepted",
            quotation.status
        )));
    }

    let order = orders::insert(
        &txn,
        quotation.dealer_id,
        quotation.customer_id,
        quotation.variant_id,
        Some(quotation.id),
    )
    .await?;
    let quotation = quotations::set_status(&txn, quotation, QuotationStatus::Accepted).await?;
    txn.commit().await?;

    tracing::info!(quotation_id = %quotation.id, order_id = %order.id, "quotation accepted");
    audit::record(
        state,
        user,
        "quotation_accept",
        "quotations",
        serde_json::json!({ "quotation_id": quotation.id, "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Quotation accepted",
        QuotationAccepted {
            quotation: Quotation::from(quotation),
            order: Order::from(order),
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_is_total_minus_payments() {
        assert_eq!(remaining_balance(500_000_000, 0), 500_000_000);
        assert_eq!(remaining_balance(500_000_000, 200_000_000), 300_000_000);
        assert_eq!(remaining_balance(500_000_000, 500_000_000), 0);
    }

    #[test]
    fn balance_is_not_clamped() {
        assert_eq!(remaining_balance(100, 150), -50);
        assert!(is_ready_for_delivery(-50));
    }

    #[test]
    fn delivery_requires_settled_balance() {
        assert!(is_ready_for_delivery(0));
        assert!(!is_ready_for_delivery(1));
    }
}
