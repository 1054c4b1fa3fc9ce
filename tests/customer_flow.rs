mod common;

use chrono::{Duration, NaiveTime, Utc};
use dealership_api::{
    dto::{
        auth::RegisterRequest,
        customers::CreateCustomerRequest,
        dashboard::Dashboard,
        feedbacks::CreateFeedbackRequest,
        sales::{CreateOrderRequest, PaymentRequest},
        test_drives::ScheduleTestDriveRequest,
    },
    error::AppError,
    repositories::customers,
    routes::params::{CareReportQuery, DateRangeQuery},
    services::{
        auth_service, customer_service, dashboard_service, dealer_service, sales_service,
    },
};
use uuid::Uuid;

use common::{
    admin, create_customer, create_dealer, create_variant, customer_user, dealer_staff,
    setup_state, suffix,
};

fn cash(amount: i64) -> PaymentRequest {
    PaymentRequest {
        amount,
        method: "Bank transfer".to_string(),
    }
}

fn registration(email: &str, dealer_id: Option<Uuid>) -> RegisterRequest {
    RegisterRequest {
        full_name: "Nguyen Van A".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
        phone: Some("0900000000".to_string()),
        dealer_id,
    }
}

fn new_customer(email: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        dealer_id: None,
        full_name: "Tran Thi B".to_string(),
        email: email.to_string(),
        phone: None,
        birthday: None,
    }
}

#[tokio::test]
async fn profile_report_and_dashboards_follow_payments() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 500_000_000).await?;
    let staff = dealer_staff(dealer_id);
    let customer = customer_user(customer_id);
    let today = Utc::now().date_naive();

    let order = sales_service::create_order(
        &state,
        &staff,
        CreateOrderRequest {
            customer_id,
            variant_id,
            dealer_id: None,
        },
    )
    .await?
    .data
    .expect("order");
    sales_service::process_payment(&state, &staff, order.id, cash(300_000_000)).await?;

    let profile = customer_service::customer_profile(&state, &customer, customer_id)
        .await?
        .data
        .expect("profile");
    assert_eq!(profile.outstanding_balance, 200_000_000);
    assert_eq!(profile.total_purchase_amount, 0);
    assert_eq!(profile.orders.len(), 1);

    match dashboard_service::dashboard(&state, &customer).await?.data {
        Some(Dashboard::Customer(summary)) => {
            assert_eq!(summary.orders, 1);
            assert_eq!(summary.outstanding_balance, 200_000_000);
        }
        other => panic!("expected a customer dashboard, got {other:?}"),
    }

    sales_service::process_payment(&state, &staff, order.id, cash(200_000_000)).await?;
    sales_service::complete_order(&state, &staff, order.id).await?;

    for (rating, content) in [(4, "Friendly staff"), (5, "Smooth delivery")] {
        customer_service::create_feedback(
            &state,
            &customer,
            CreateFeedbackRequest {
                customer_id: None,
                content: Some(content.to_string()),
                rating,
            },
        )
        .await?;
    }
    customer_service::schedule_test_drive(
        &state,
        &customer,
        ScheduleTestDriveRequest {
            customer_id: None,
            variant_id,
            date: today + Duration::days(7),
            time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
        },
    )
    .await?;

    let profile = customer_service::customer_profile(&state, &staff, customer_id)
        .await?
        .data
        .expect("profile");
    assert_eq!(profile.outstanding_balance, 0);
    assert_eq!(profile.total_purchase_amount, 500_000_000);
    assert_eq!(profile.average_rating, Some(4.5));
    assert_eq!(profile.feedbacks.len(), 2);
    assert_eq!(profile.test_drives.len(), 1);

    let history = customer_service::customer_payment_history(&state, &customer, customer_id)
        .await?
        .data
        .expect("history");
    assert_eq!(history.total_paid, 500_000_000);
    assert_eq!(history.items.len(), 2);

    let report = customer_service::customer_care_report(
        &state,
        &staff,
        CareReportQuery {
            dealer_id: None,
            from: today,
            to: today + Duration::days(30),
        },
    )
    .await?
    .data
    .expect("report");
    assert_eq!(report.dealer_id, dealer_id);
    assert_eq!(report.total_customers, 1);
    assert_eq!(report.customers_with_orders, 1);
    assert_eq!(report.test_drives, 1);
    assert_eq!(report.feedback_count, 2);
    assert_eq!(report.average_rating, Some(4.5));
    assert_eq!(report.total_sales, 500_000_000);
    assert_eq!(report.recent_feedbacks.len(), 2);

    let sales = dealer_service::dealer_total_sales(
        &state,
        &staff,
        dealer_id,
        DateRangeQuery {
            from: Some(today),
            to: Some(today),
        },
    )
    .await?
    .data
    .expect("sales");
    assert_eq!(sales.total_sales, 500_000_000);

    let before = dealer_service::dealer_total_sales(
        &state,
        &admin(),
        dealer_id,
        DateRangeQuery {
            from: None,
            to: Some(today - Duration::days(1)),
        },
    )
    .await?
    .data
    .expect("sales");
    assert_eq!(before.total_sales, 0);

    match dashboard_service::dashboard(&state, &staff).await?.data {
        Some(Dashboard::DealerStaff(summary)) => {
            assert_eq!(summary.customers, 1);
            assert_eq!(summary.active_orders, 0);
            assert_eq!(summary.test_drives, 1);
            assert_eq!(summary.pending_quotations, 0);
            assert_eq!(summary.total_sales, 500_000_000);
        }
        other => panic!("expected a dealer dashboard, got {other:?}"),
    }

    match dashboard_service::dashboard(&state, &customer).await?.data {
        Some(Dashboard::Customer(summary)) => {
            assert_eq!(summary.outstanding_balance, 0);
            assert_eq!(summary.upcoming_test_drives, 1);
        }
        other => panic!("expected a customer dashboard, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn care_report_rejects_inverted_range() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let dealer_id = create_dealer(&state).await?;
    let today = Utc::now().date_naive();

    let result = customer_service::customer_care_report(
        &state,
        &dealer_staff(dealer_id),
        CareReportQuery {
            dealer_id: None,
            from: today,
            to: today - Duration::days(1),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn registration_links_existing_customer_by_email() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let email = format!("walkin-{}@example.com", suffix());
    let existing = customer_service::create_customer(&state, &dealer_staff(dealer_id), new_customer(&email))
        .await?
        .data
        .expect("customer");

    let user = auth_service::register_user(&state, registration(&email.to_uppercase(), None))
        .await?
        .data
        .expect("user");
    assert_eq!(user.customer_id, Some(existing.id));
    assert_eq!(user.dealer_id, Some(dealer_id));

    let again = auth_service::register_user(&state, registration(&email, None)).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn registration_creates_customer_under_dealer() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let email = format!("new-{}@example.com", suffix());
    let user = auth_service::register_user(&state, registration(&email, Some(dealer_id)))
        .await?
        .data
        .expect("user");

    let customer = customers::find_by_email(&state.orm, &email).await?.expect("customer row");
    assert_eq!(user.customer_id, Some(customer.id));
    assert_eq!(customer.dealer_id, dealer_id);
    assert_eq!(customer.phone.as_deref(), Some("0900000000"));

    // Without a dealer the account still lands under an existing one.
    let email = format!("nodealer-{}@example.com", suffix());
    let user = auth_service::register_user(&state, registration(&email, None))
        .await?
        .data
        .expect("user");
    let customer = customers::find_by_email(&state.orm, &email).await?.expect("customer row");
    assert_eq!(user.customer_id, Some(customer.id));
    assert!(dealer_service::get_dealer(&state, &admin(), customer.dealer_id).await.is_ok());

    let missing = auth_service::register_user(
        &state,
        registration(&format!("lost-{}@example.com", suffix()), Some(Uuid::new_v4())),
    )
    .await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_keep_customer_email_unique() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let email = format!("race-{}@example.com", suffix());

    let mut handles = Vec::new();
    for i in 0..8 {
        let state = state.clone();
        let email = if i % 2 == 0 { email.clone() } else { email.to_uppercase() };
        handles.push(tokio::spawn(async move {
            customer_service::create_customer(&state, &dealer_staff(dealer_id), new_customer(&email))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(created, 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_insert_is_a_conflict() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let email = format!("direct-{}@example.com", suffix());
    let row = |email: String| customers::NewCustomer {
        dealer_id,
        full_name: "Le Van C".to_string(),
        email,
        phone: None,
        birthday: None,
    };

    customers::insert(&state.orm, row(email.clone())).await?;
    let err = customers::insert(&state.orm, row(email.to_uppercase()))
        .await
        .expect_err("second insert must hit the unique index");
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    Ok(())
}
