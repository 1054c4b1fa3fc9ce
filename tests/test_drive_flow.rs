mod common;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use dealership_api::{
    dto::test_drives::ScheduleTestDriveRequest,
    entity::test_drives::TestDriveStatus,
    error::AppError,
    routes::params::AvailabilityQuery,
    services::customer_service,
};
use uuid::Uuid;

use common::{create_customer, create_dealer, create_variant, customer_user, dealer_staff, setup_state};

fn next_month() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(30)
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time")
}

fn booking(variant_id: Uuid, date: NaiveDate, time: NaiveTime) -> ScheduleTestDriveRequest {
    ScheduleTestDriveRequest {
        customer_id: None,
        variant_id,
        date,
        time,
    }
}

#[tokio::test]
async fn slot_is_held_per_variant_and_per_customer() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let alice = customer_user(create_customer(&state, dealer_id).await?);
    let bob = customer_user(create_customer(&state, dealer_id).await?);
    let vf8 = create_variant(&state, 900_000_000).await?;
    let vf5 = create_variant(&state, 450_000_000).await?;
    let date = next_month();

    let first = customer_service::schedule_test_drive(&state, &alice, booking(vf8, date, at(10)))
        .await?;
    assert_eq!(first.message, "Test drive scheduled");
    let first = first.data.expect("test drive");
    assert_eq!(first.status, TestDriveStatus::Scheduled);

    let taken = customer_service::schedule_test_drive(&state, &bob, booking(vf8, date, at(10))).await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    let busy = customer_service::schedule_test_drive(&state, &alice, booking(vf5, date, at(10))).await;
    assert!(matches!(busy, Err(AppError::Conflict(_))));

    let later = customer_service::schedule_test_drive(&state, &bob, booking(vf8, date, at(11))).await?;
    assert_eq!(later.data.expect("test drive").scheduled_time, at(11));

    let availability = customer_service::check_availability(
        &state,
        &bob,
        AvailabilityQuery {
            date,
            time: at(10),
            variant_id: vf8,
            customer_id: None,
        },
    )
    .await?
    .data
    .expect("availability");
    assert!(!availability.available);
    assert!(availability.message.is_some());
    Ok(())
}

#[tokio::test]
async fn identical_booking_returns_existing_test_drive() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer = customer_user(create_customer(&state, dealer_id).await?);
    let variant_id = create_variant(&state, 600_000_000).await?;
    let date = next_month();

    let first = customer_service::schedule_test_drive(&state, &customer, booking(variant_id, date, at(9)))
        .await?
        .data
        .expect("test drive");
    let again = customer_service::schedule_test_drive(&state, &customer, booking(variant_id, date, at(9)))
        .await?;
    assert_eq!(again.message, "Test drive already scheduled");
    assert_eq!(again.data.expect("test drive").id, first.id);

    let schedule = customer_service::test_drive_schedule(&state, &dealer_staff(dealer_id), date)
        .await?
        .data
        .expect("schedule");
    assert_eq!(schedule.items.iter().filter(|td| td.id == first.id).count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_drive_lifecycle_and_released_slot() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let staff = dealer_staff(dealer_id);
    let alice = customer_user(create_customer(&state, dealer_id).await?);
    let bob = customer_user(create_customer(&state, dealer_id).await?);
    let variant_id = create_variant(&state, 700_000_000).await?;
    let date = next_month();

    let drive = customer_service::schedule_test_drive(&state, &alice, booking(variant_id, date, at(14)))
        .await?
        .data
        .expect("test drive");

    let early = customer_service::complete_test_drive(&state, &staff, drive.id).await;
    assert!(matches!(early, Err(AppError::InvalidState(_))));

    let confirmed = customer_service::confirm_test_drive(&state, &staff, drive.id)
        .await?
        .data
        .expect("test drive");
    assert_eq!(confirmed.status, TestDriveStatus::Confirmed);

    let done = customer_service::complete_test_drive(&state, &staff, drive.id)
        .await?
        .data
        .expect("test drive");
    assert_eq!(done.status, TestDriveStatus::Completed);

    let cancel = customer_service::cancel_test_drive(&state, &alice, drive.id).await;
    assert!(matches!(cancel, Err(AppError::InvalidState(_))));

    // Completed drives no longer hold the slot.
    let rebooked = customer_service::schedule_test_drive(&state, &bob, booking(variant_id, date, at(14)))
        .await?
        .data
        .expect("test drive");
    let cancelled = customer_service::cancel_test_drive(&state, &bob, rebooked.id)
        .await?
        .data
        .expect("test drive");
    assert_eq!(cancelled.status, TestDriveStatus::Cancelled);
    Ok(())
}

#[tokio::test]
async fn past_dates_are_rejected() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer = customer_user(create_customer(&state, dealer_id).await?);
    let variant_id = create_variant(&state, 500_000_000).await?;
    let yesterday = Utc::now().date_naive() - Duration::days(1);

    let result = customer_service::schedule_test_drive(&state, &customer, booking(variant_id, yesterday, at(10)))
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn customers_check_availability_for_themselves() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let alice_id = create_customer(&state, dealer_id).await?;
    let alice = customer_user(alice_id);
    let bob = customer_user(create_customer(&state, dealer_id).await?);
    let vf8 = create_variant(&state, 900_000_000).await?;
    let vf5 = create_variant(&state, 450_000_000).await?;
    let date = next_month();

    customer_service::schedule_test_drive(&state, &alice, booking(vf8, date, at(15))).await?;

    let query = || AvailabilityQuery {
        date,
        time: at(15),
        variant_id: vf5,
        customer_id: Some(alice_id),
    };

    // Another customer naming Alice still gets their own view of the slot.
    let for_bob = customer_service::check_availability(&state, &bob, query())
        .await?
        .data
        .expect("availability");
    assert!(for_bob.available);

    let for_staff = customer_service::check_availability(&state, &dealer_staff(dealer_id), query())
        .await?
        .data
        .expect("availability");
    assert!(!for_staff.available);
    Ok(())
}
