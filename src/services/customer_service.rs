use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::{
        customers::{
            CreateCustomerRequest, CustomerCareReport, CustomerList, CustomerProfile,
            PaymentHistory, UpdateCustomerRequest,
        },
        feedbacks::{CreateFeedbackRequest, FeedbackList},
        test_drives::{Availability, DaySchedule, ScheduleTestDriveRequest, TestDriveList},
    },
    entity::{
        customers::{ActiveModel as CustomerActive, Model as CustomerModel},
        test_drives::{Model as TestDriveModel, TestDriveStatus},
        users::Role,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Scope, ensure_any_role},
    models::{Customer, Feedback, Order, Payment, TestDrive},
    repositories::{
        customers, dealers, feedbacks, feedbacks::FeedbackFilter, orders, orders::OrderFilter,
        payments, test_drives, test_drives::TestDriveFilter, variants,
    },
    response::{ApiResponse, Meta},
    routes::params::{
        AvailabilityQuery, CareReportQuery, CustomerQuery, FeedbackQuery, TestDriveListQuery,
    },
    scheduling::{SlotCheck, SlotRequest, check_slot},
    state::AppState,
};

const STAFF_ROLES: [Role; 2] = [Role::Admin, Role::DealerStaff];

fn scope_allows_customer(scope: Scope, customer: &CustomerModel) -> bool {
    scope.allows(customer.dealer_id, customer.id)
}

/// Loads a customer the principal may see. Out-of-scope customers read as missing.
async fn visible_customer<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<CustomerModel> {
    let scope = user.scope()?;
    match customers::find(conn, id).await? {
        Some(c) if scope_allows_customer(scope, &c) => Ok(c),
        _ => Err(AppError::NotFound),
    }
}

/// Customers act for themselves; staff name the customer explicitly.
fn acting_customer_id(user: &AuthUser, requested: Option<Uuid>) -> AppResult<Uuid> {
    match user.role {
        Role::Customer => user.customer_id.ok_or(AppError::Forbidden),
        Role::Admin | Role::DealerStaff => {
            requested.ok_or_else(|| AppError::bad_request("customer_id is required"))
        }
        Role::EvmStaff => Err(AppError::Forbidden),
    }
}

pub async fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    ensure_any_role(user, &STAFF_ROLES)?;
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
    if customers::find_by_email(&state.orm, &payload.email).await?.is_some() {
        return Err(AppError::Conflict("A customer with this email already exists".into()));
    }

    let customer = customers::insert(
        &state.orm,
        customers::NewCustomer {
            dealer_id,
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            birthday: payload.birthday,
        },
    )
    .await?;

    audit::record(
        state,
        user,
        "customer_create",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;
    Ok(ApiResponse::success("Customer created", Customer::from(customer), Some(Meta::empty())))
}

pub async fn update_customer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    payload.validate()?;
    let existing = visible_customer(&state.orm, user, id).await?;

    if let Some(email) = payload.email.as_deref() {
        if let Some(other) = customers::find_by_email(&state.orm, email).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict("A customer with this email already exists".into()));
            }
        }
    }

    let mut active: CustomerActive = existing.into();
    if let Some(full_name) = payload.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(birthday) = payload.birthday {
        active.birthday = Set(Some(birthday));
    }
    let customer = customers::update(&state.orm, active).await?;

    audit::record(
        state,
        user,
        "customer_update",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;
    Ok(ApiResponse::success("Customer updated", Customer::from(customer), Some(Meta::empty())))
}

pub async fn get_customer(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = visible_customer(&state.orm, user, id).await?;
    Ok(ApiResponse::success("OK", Customer::from(customer), Some(Meta::empty())))
}

pub async fn get_customer_by_email(
    state: &AppState,
    user: &AuthUser,
    email: &str,
) -> AppResult<ApiResponse<Customer>> {
    ensure_any_role(user, &STAFF_ROLES)?;
    let scope = user.scope()?;
    match customers::find_by_email(&state.orm, email).await? {
        Some(c) if scope_allows_customer(scope, &c) => {
            Ok(ApiResponse::success("OK", Customer::from(c), Some(Meta::empty())))
        }
        _ => Err(AppError::NotFound),
    }
}

/// Listing and search in one: `q` matches name, email or phone.
pub async fn list_customers(
    state: &AppState,
    user: &AuthUser,
    query: CustomerQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    ensure_any_role(user, &STAFF_ROLES)?;
    let dealer_id = match user.scope()? {
        Scope::Dealer(id) => Some(id),
        _ => query.dealer_id,
    };
    let (page, limit, offset) = query.pagination().normalize();
    let (items, total) = customers::search(
        &state.orm,
        dealer_id,
        query.q.as_deref(),
        limit as u64,
        offset as u64,
    )
    .await?;
    let items = items.into_iter().map(Customer::from).collect();
    Ok(ApiResponse::success(
        "OK",
        CustomerList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

pub async fn customer_profile(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CustomerProfile>> {
    let customer = visible_customer(&state.orm, user, id).await?;

    let orders_list = orders::list_all(&state.orm, &OrderFilter::for_customer(customer.id)).await?;
    let drives = test_drives::list_all(
        &state.orm,
        &TestDriveFilter {
            customer_id: Some(customer.id),
            ..Default::default()
        },
    )
    .await?;
    let feedback_filter = FeedbackFilter {
        customer_id: Some(customer.id),
        ..Default::default()
    };
    let feedback_list = feedbacks::list_all(&state.orm, &feedback_filter).await?;
    let average_rating = feedbacks::average_rating(&state.orm, &feedback_filter).await?;
    let total_purchase_amount =
        orders::completed_sales_total(&state.orm, None, Some(customer.id), None, None).await?;
    let outstanding_balance = orders::outstanding_balance(&state.orm, customer.id).await?;

    let profile = CustomerProfile {
        customer: Customer::from(customer),
        orders: orders_list.into_iter().map(Order::from).collect(),
        test_drives: drives.into_iter().map(TestDrive::from).collect(),
        feedbacks: feedback_list.into_iter().map(Feedback::from).collect(),
        total_purchase_amount,
        outstanding_balance,
        average_rating,
    };
    Ok(ApiResponse::success("OK", profile, Some(Meta::empty())))
}

pub async fn customer_payment_history(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<PaymentHistory>> {
    let customer = visible_customer(&state.orm, user, id).await?;
    let items: Vec<Payment> = payments::list_for_customer(&state.orm, customer.id)
        .await?
        .into_iter()
        .map(Payment::from)
        .collect();
    let total_paid = items.iter().map(|p| p.amount).sum();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "OK",
        PaymentHistory {
            customer_id: customer.id,
            total_paid,
            items,
        },
        Some(meta),
    ))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub async fn customer_care_report(
    state: &AppState,
    user: &AuthUser,
    query: CareReportQuery,
) -> AppResult<ApiResponse<CustomerCareReport>> {
    ensure_any_role(user, &STAFF_ROLES)?;
    let dealer_id = match (user.scope()?, query.dealer_id) {
        (Scope::Dealer(id), _) => id,
        (_, Some(id)) => id,
        (_, None) => return Err(AppError::bad_request("dealer_id is required")),
    };
    if query.from > query.to {
        return Err(AppError::bad_request("from must not be after to"));
    }
    if dealers::find(&state.orm, dealer_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let total_customers = customers::count_for_dealer(&state.orm, dealer_id).await?;

    let order_filter = OrderFilter {
        from: Some(query.from),
        to: Some(query.to),
        ..OrderFilter::for_dealer(dealer_id)
    };
    let customers_with_orders = orders::list_all(&state.orm, &order_filter)
        .await?
        .iter()
        .map(|o| o.customer_id)
        .collect::<HashSet<_>>()
        .len() as u64;

    let test_drive_count = test_drives::count(
        &state.orm,
        &TestDriveFilter {
            dealer_id: Some(dealer_id),
            from: Some(query.from),
            to: Some(query.to),
            ..Default::default()
        },
    )
    .await?;

    let feedback_filter = FeedbackFilter {
        dealer_id: Some(dealer_id),
        from: Some(start_of_day(query.from)),
        to: Some(start_of_day(query.to.succ_opt().unwrap_or(query.to))),
        ..Default::default()
    };
    let (recent, feedback_count) = feedbacks::list(&state.orm, &feedback_filter, 10, 0).await?;
    let average_rating = feedbacks::average_rating(&state.orm, &feedback_filter).await?;

    let total_sales = orders::completed_sales_total(
        &state.orm,
        Some(dealer_id),
        None,
        Some(query.from),
        Some(query.to),
    )
    .await?;

    let report = CustomerCareReport {
        dealer_id,
        from: query.from,
        to: query.to,
        total_customers,
        customers_with_orders,
        test_drives: test_drive_count,
        feedback_count,
        average_rating,
        total_sales,
        recent_feedbacks: recent.into_iter().map(Feedback::from).collect(),
        generated_at: Utc::now(),
    };
    Ok(ApiResponse::success("Customer care report", report, Some(Meta::empty())))
}

pub async fn check_availability(
    state: &AppState,
    user: &AuthUser,
    query: AvailabilityQuery,
) -> AppResult<ApiResponse<Availability>> {
    if variants::find(&state.orm, query.variant_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let customer_id = match user.role {
        Role::Customer => user.customer_id,
        _ => query.customer_id,
    };
    let bookings = test_drives::active_on_date(&state.orm, query.date).await?;
    let check = check_slot(
        &bookings,
        &SlotRequest {
            date: query.date,
            time: query.time,
            variant_id: query.variant_id,
            customer_id,
        },
    );
    let availability = Availability {
        available: check.is_free(),
        message: check.message(),
    };
    Ok(ApiResponse::success("OK", availability, Some(Meta::empty())))
}

/// Books a slot. The variant and customer rows stay locked while the day's
/// bookings are checked, so two concurrent requests cannot both take a slot.
pub async fn schedule_test_drive(
    state: &AppState,
    user: &AuthUser,
    payload: ScheduleTestDriveRequest,
) -> AppResult<ApiResponse<TestDrive>> {
    payload.validate()?;
    let customer_id = acting_customer_id(user, payload.customer_id)?;
    if payload.date < Utc::now().date_naive() {
        return Err(AppError::bad_request("Test drives cannot be booked in the past"));
    }

    let txn = state.orm.begin().await?;
    if variants::find_for_update(&txn, payload.variant_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let scope = user.scope()?;
    match customers::find_for_update(&txn, customer_id).await? {
        Some(c) if scope_allows_customer(scope, &c) => {}
        _ => return Err(AppError::NotFound),
    }

    let bookings = test_drives::active_on_date(&txn, payload.date).await?;
    let request = SlotRequest {
        date: payload.date,
        time: payload.time,
        variant_id: payload.variant_id,
        customer_id: Some(customer_id),
    };
    let (test_drive, created) = match check_slot(&bookings, &request) {
        SlotCheck::Free => {
            let created = test_drives::insert(
                &txn,
                customer_id,
                payload.variant_id,
                payload.date,
                payload.time,
            )
            .await?;
            (created, true)
        }
        SlotCheck::AlreadyBooked(existing) => (existing.clone(), false),
        conflict => {
            let message = conflict
                .message()
                .unwrap_or_else(|| "Slot is not available".to_string());
            return Err(AppError::Conflict(message));
        }
    };
    txn.commit().await?;

    if created {
        tracing::info!(
            test_drive_id = %test_drive.id,
            customer_id = %customer_id,
            date = %test_drive.scheduled_date,
            time = %test_drive.scheduled_time,
            "test drive scheduled"
        );
        audit::record(
            state,
            user,
            "test_drive_schedule",
            "test_drives",
            serde_json::json!({ "test_drive_id": test_drive.id }),
        )
        .await;
    } else {
        tracing::debug!(test_drive_id = %test_drive.id, "duplicate test drive request");
    }

    let message = if created {
        "Test drive scheduled"
    } else {
        "Test drive already scheduled"
    };
    Ok(ApiResponse::success(message, TestDrive::from(test_drive), Some(Meta::empty())))
}

async fn visible_test_drive<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
    lock: bool,
) -> AppResult<TestDriveModel> {
    let scope = user.scope()?;
    let test_drive = if lock {
        test_drives::find_for_update(conn, id).await?
    } else {
        test_drives::find(conn, id).await?
    };
    let test_drive = match test_drive {
        Some(td) => td,
        None => return Err(AppError::NotFound),
    };
    match customers::find(conn, test_drive.customer_id).await? {
        Some(c) if scope_allows_customer(scope, &c) => Ok(test_drive),
        _ => Err(AppError::NotFound),
    }
}

async fn move_test_drive(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    next: TestDriveStatus,
) -> AppResult<TestDriveModel> {
    let txn = state.orm.begin().await?;
    let test_drive = visible_test_drive(&txn, user, id, true).await?;
    if !test_drive.status.can_transition_to(next) {
        return Err(AppError::invalid_state(format!(
            "Test drive is {:?} and cannot move to {:?}",
            test_drive.status, next
        )));
    }
    let test_drive = test_drives::set_status(&txn, test_drive, next).await?;
    txn.commit().await?;

    tracing::info!(test_drive_id = %test_drive.id, status = ?next, "test drive updated");
    audit::record(
        state,
        user,
        "test_drive_status",
        "test_drives",
        serde_json::json!({ "test_drive_id": test_drive.id, "status": test_drive.status }),
    )
    .await;
    Ok(test_drive)
}

pub async fn confirm_test_drive(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<TestDrive>> {
    ensure_any_role(user, &STAFF_ROLES)?;
    let td = move_test_drive(state, user, id, TestDriveStatus::Confirmed).await?;
    Ok(ApiResponse::success("Test drive confirmed", TestDrive::from(td), Some(Meta::empty())))
}

pub async fn complete_test_drive(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<TestDrive>> {
    ensure_any_role(user, &STAFF_ROLES)?;
    let td = move_test_drive(state, user, id, TestDriveStatus::Completed).await?;
    Ok(ApiResponse::success("Test drive completed", TestDrive::from(td), Some(Meta::empty())))
}

/// Staff or the booking customer may cancel.
pub async fn cancel_test_drive(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<TestDrive>> {
    let td = move_test_drive(state, user, id, TestDriveStatus::Cancelled).await?;
    Ok(ApiResponse::success("Test drive cancelled", TestDrive::from(td), Some(Meta::empty())))
}

pub async fn get_test_drive(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<TestDrive>> {
    let td = visible_test_drive(&state.orm, user, id, false).await?;
    Ok(ApiResponse::success("OK", TestDrive::from(td), Some(Meta::empty())))
}

pub async fn list_test_drives(
    state: &AppState,
    user: &AuthUser,
    query: TestDriveListQuery,
) -> AppResult<ApiResponse<TestDriveList>> {
    let scope = user.scope()?;
    let (page, limit, offset) = query.pagination().normalize();
    let filter = TestDriveFilter {
        dealer_id: scope.dealer_id(),
        customer_id: scope.customer_id(),
        variant_id: query.variant_id,
        status: query.status,
        ..Default::default()
    };
    let (items, total) = test_drives::list(&state.orm, &filter, limit as u64, offset as u64).await?;
    let items = items.into_iter().map(TestDrive::from).collect();
    Ok(ApiResponse::success(
        "OK",
        TestDriveList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}

/// One day's bookings in slot order.
pub async fn test_drive_schedule(
    state: &AppState,
    user: &AuthUser,
    date: NaiveDate,
) -> AppResult<ApiResponse<DaySchedule>> {
    let scope = user.scope()?;
    let items: Vec<TestDrive> =
        test_drives::on_date(&state.orm, date, scope.dealer_id(), scope.customer_id())
            .await?
            .into_iter()
            .map(TestDrive::from)
            .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", DaySchedule { date, items }, Some(meta)))
}

pub async fn create_feedback(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFeedbackRequest,
) -> AppResult<ApiResponse<Feedback>> {
    payload.validate()?;
    let customer_id = acting_customer_id(user, payload.customer_id)?;
    let customer = visible_customer(&state.orm, user, customer_id).await?;

    let content = payload
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let feedback = feedbacks::insert(&state.orm, customer.id, content, payload.rating).await?;

    audit::record(
        state,
        user,
        "feedback_create",
        "feedbacks",
        serde_json::json!({ "feedback_id": feedback.id, "rating": feedback.rating }),
    )
    .await;
    Ok(ApiResponse::success("Feedback recorded", Feedback::from(feedback), Some(Meta::empty())))
}

pub async fn list_feedbacks(
    state: &AppState,
    user: &AuthUser,
    query: FeedbackQuery,
) -> AppResult<ApiResponse<FeedbackList>> {
    let scope = user.scope()?;
    let (page, limit, offset) = query.pagination().normalize();
    let filter = FeedbackFilter {
        dealer_id: scope.dealer_id(),
        customer_id: scope.customer_id().or(query.customer_id),
        ..Default::default()
    };
    let (items, total) = feedbacks::list(&state.orm, &filter, limit as u64, offset as u64).await?;
    let items = items.into_iter().map(Feedback::from).collect();
    Ok(ApiResponse::success(
        "OK",
        FeedbackList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}
