mod common;

use dealership_api::{
    dto::{
        feedbacks::CreateFeedbackRequest,
        sales::CreateOrderRequest,
        vehicles::{CreateManufacturerRequest, UpdateVariantRequest},
    },
    error::AppError,
    services::{customer_service, sales_service, vehicle_service},
};
use common::{
    admin, create_customer, create_dealer, create_manufacturer, create_variant,
    create_vehicle_model, customer_user, dealer_staff, setup_state, suffix,
};

fn feedback(rating: i32, content: Option<&str>) -> CreateFeedbackRequest {
    CreateFeedbackRequest {
        customer_id: None,
        content: content.map(str::to_string),
        rating,
    }
}

#[tokio::test]
async fn manufacturer_with_models_cannot_be_deleted() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let admin = admin();

    let manufacturer_id = create_manufacturer(&state).await?;
    let model_id = create_vehicle_model(&state, manufacturer_id).await?;

    let blocked = vehicle_service::delete_manufacturer(&state, &admin, manufacturer_id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    vehicle_service::delete_vehicle_model(&state, &admin, model_id).await?;
    vehicle_service::delete_manufacturer(&state, &admin, manufacturer_id).await?;

    let gone = vehicle_service::get_manufacturer(&state, manufacturer_id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn manufacturer_names_are_unique_ignoring_case() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let name = format!("Hyundai {}", suffix());

    let request = |name: String| CreateManufacturerRequest {
        name,
        country: None,
        address: None,
    };
    vehicle_service::create_manufacturer(&state, &admin(), request(name.clone())).await?;

    let duplicate =
        vehicle_service::create_manufacturer(&state, &admin(), request(name.to_uppercase())).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn catalog_writes_need_catalog_role() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let dealer_id = create_dealer(&state).await?;

    let result = vehicle_service::create_manufacturer(
        &state,
        &dealer_staff(dealer_id),
        CreateManufacturerRequest {
            name: format!("Kia {}", suffix()),
            country: None,
            address: None,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn ordered_variant_cannot_be_deleted() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 800_000_000).await?;

    sales_service::create_order(
        &state,
        &dealer_staff(dealer_id),
        CreateOrderRequest {
            customer_id,
            variant_id,
            dealer_id: None,
        },
    )
    .await?;

    let blocked = vehicle_service::delete_variant(&state, &admin(), variant_id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    // Repricing to zero marks the variant unavailable.
    let variant = vehicle_service::update_variant(
        &state,
        &admin(),
        variant_id,
        UpdateVariantRequest {
            model_id: None,
            version: None,
            color: None,
            product_year: None,
            price: Some(0),
            quantity: None,
        },
    )
    .await?;
    assert_eq!(variant.data.expect("variant").price, 0);

    let detail = vehicle_service::get_variant(&state, variant_id).await?.data.expect("detail");
    assert!(!detail.available);
    Ok(())
}

#[tokio::test]
async fn feedback_rating_must_be_one_to_five() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let customer = customer_user(customer_id);

    for rating in [0, 6] {
        let result = customer_service::create_feedback(&state, &customer, feedback(rating, None)).await;
        assert!(matches!(result, Err(AppError::Validation(_))), "rating {rating}");
    }

    let low = customer_service::create_feedback(&state, &customer, feedback(1, Some("  ")))
        .await?
        .data
        .expect("feedback");
    assert_eq!(low.rating, 1);
    assert_eq!(low.content, None);

    let high = customer_service::create_feedback(&state, &customer, feedback(5, Some(" Great service ")))
        .await?
        .data
        .expect("feedback");
    assert_eq!(high.customer_id, customer_id);
    assert_eq!(high.content.as_deref(), Some("Great service"));

    // Staff must name the customer they post for.
    let unnamed = customer_service::create_feedback(&state, &dealer_staff(dealer_id), feedback(4, None)).await;
    assert!(matches!(unnamed, Err(AppError::BadRequest(_))));

    let foreign = customer_service::create_feedback(
        &state,
        &dealer_staff(create_dealer(&state).await?),
        CreateFeedbackRequest {
            customer_id: Some(customer_id),
            content: None,
            rating: 4,
        },
    )
    .await;
    assert!(matches!(foreign, Err(AppError::NotFound)));

    Ok(())
}
