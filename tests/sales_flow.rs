mod common;

use dealership_api::{
    dto::sales::{
        CreateOrderRequest, CreateQuotationRequest, CreateSalesContractRequest, PaymentRequest,
        RejectOrderRequest,
    },
    entity::{orders::OrderStatus, quotations::QuotationStatus},
    error::AppError,
    services::sales_service,
};
use uuid::Uuid;

use common::{create_customer, create_dealer, create_variant, customer_user, dealer_staff, setup_state};

fn cash(amount: i64) -> PaymentRequest {
    PaymentRequest {
        amount,
        method: "Cash".to_string(),
    }
}

fn order_request(customer_id: Uuid, variant_id: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id,
        variant_id,
        dealer_id: None,
    }
}

#[tokio::test]
async fn partial_payments_settle_order_before_completion() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 500_000_000).await?;
    let staff = dealer_staff(dealer_id);

    let order = sales_service::create_order(&state, &staff, order_request(customer_id, variant_id))
        .await?
        .data
        .expect("order");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.dealer_id, dealer_id);

    let order = sales_service::confirm_order(&state, &staff, order.id).await?.data.expect("order");
    assert_eq!(order.status, OrderStatus::Confirmed);

    let receipt = sales_service::process_payment(&state, &staff, order.id, cash(200_000_000))
        .await?
        .data
        .expect("receipt");
    assert_eq!(receipt.remaining_balance, 300_000_000);
    assert_eq!(receipt.order.status, OrderStatus::Confirmed);

    let balance = sales_service::get_balance(&state, &staff, order.id).await?.data.expect("balance");
    assert_eq!(balance.total, 500_000_000);
    assert_eq!(balance.paid, 200_000_000);
    assert!(!balance.ready_for_delivery);

    let early = sales_service::complete_order(&state, &staff, order.id).await;
    assert!(matches!(early, Err(AppError::InvalidState(_))));

    let receipt = sales_service::process_payment(&state, &staff, order.id, cash(300_000_000))
        .await?
        .data
        .expect("receipt");
    assert_eq!(receipt.remaining_balance, 0);
    assert_eq!(receipt.order.status, OrderStatus::Paid);

    let order = sales_service::complete_order(&state, &staff, order.id).await?.data.expect("order");
    assert_eq!(order.status, OrderStatus::Completed);

    let late = sales_service::process_payment(&state, &staff, order.id, cash(1)).await;
    assert!(matches!(late, Err(AppError::InvalidState(_))));

    let payments = sales_service::list_payments(&state, &staff, order.id).await?.data.expect("payments");
    assert_eq!(payments.items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn pending_order_completes_once_fully_paid() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 500_000_000).await?;
    let staff = dealer_staff(dealer_id);

    let order = sales_service::create_order(&state, &staff, order_request(customer_id, variant_id))
        .await?
        .data
        .expect("order");

    let receipt = sales_service::process_payment(&state, &staff, order.id, cash(300_000_000))
        .await?
        .data
        .expect("receipt");
    assert_eq!(receipt.remaining_balance, 200_000_000);
    assert_eq!(receipt.order.status, OrderStatus::Pending);

    match sales_service::complete_order(&state, &staff, order.id).await {
        Err(AppError::InvalidState(message)) => assert!(message.contains("200000000")),
        other => panic!("expected an outstanding balance error, got {:?}", other.map(|r| r.message)),
    }

    sales_service::process_payment(&state, &staff, order.id, cash(200_000_000)).await?;
    let balance = sales_service::get_balance(&state, &staff, order.id).await?.data.expect("balance");
    assert_eq!(balance.remaining_balance, 0);
    assert!(balance.ready_for_delivery);

    let order = sales_service::complete_order(&state, &staff, order.id).await?.data.expect("order");
    assert_eq!(order.status, OrderStatus::Completed);
    Ok(())
}

#[tokio::test]
async fn payment_amount_is_bounded_by_remaining_balance() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 100_000_000).await?;
    let staff = dealer_staff(dealer_id);

    let order = sales_service::create_order(&state, &staff, order_request(customer_id, variant_id))
        .await?
        .data
        .expect("order");

    let over = sales_service::process_payment(&state, &staff, order.id, cash(150_000_000)).await;
    assert!(matches!(over, Err(AppError::BadRequest(_))));

    let zero = sales_service::process_payment(&state, &staff, order.id, cash(0)).await;
    assert!(matches!(zero, Err(AppError::Validation(_))));

    // A Pending order keeps its status even when fully paid.
    let receipt = sales_service::process_payment(&state, &staff, order.id, cash(100_000_000))
        .await?
        .data
        .expect("receipt");
    assert_eq!(receipt.remaining_balance, 0);
    assert_eq!(receipt.order.status, OrderStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn rejected_order_is_closed() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 250_000_000).await?;
    let staff = dealer_staff(dealer_id);

    let order = sales_service::create_order(&state, &staff, order_request(customer_id, variant_id))
        .await?
        .data
        .expect("order");
    let rejected = sales_service::reject_order(
        &state,
        &staff,
        order.id,
        RejectOrderRequest {
            reason: Some("Out of stock".to_string()),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(rejected.status, OrderStatus::Rejected);

    let confirm = sales_service::confirm_order(&state, &staff, order.id).await;
    assert!(matches!(confirm, Err(AppError::InvalidState(_))));

    let pay = sales_service::process_payment(&state, &staff, order.id, cash(1_000)).await;
    assert!(matches!(pay, Err(AppError::InvalidState(_))));
    Ok(())
}

#[tokio::test]
async fn other_dealers_orders_are_hidden() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let other_dealer = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 300_000_000).await?;

    let order = sales_service::create_order(
        &state,
        &dealer_staff(dealer_id),
        order_request(customer_id, variant_id),
    )
    .await?
    .data
    .expect("order");

    let foreign = sales_service::get_order(&state, &dealer_staff(other_dealer), order.id).await;
    assert!(matches!(foreign, Err(AppError::NotFound)));

    let own = sales_service::get_order(&state, &customer_user(customer_id), order.id).await?;
    assert_eq!(own.data.expect("order").id, order.id);

    // Customers of another dealer cannot be ordered for.
    let stranger = create_customer(&state, other_dealer).await?;
    let cross = sales_service::create_order(
        &state,
        &dealer_staff(dealer_id),
        order_request(stranger, variant_id),
    )
    .await;
    assert!(matches!(cross, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn accepted_quotation_becomes_contracted_order() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let dealer_id = create_dealer(&state).await?;
    let customer_id = create_customer(&state, dealer_id).await?;
    let variant_id = create_variant(&state, 500_000_000).await?;
    let staff = dealer_staff(dealer_id);
    let buyer = customer_user(customer_id);

    let quotation = sales_service::create_quotation(
        &state,
        &staff,
        CreateQuotationRequest {
            customer_id,
            variant_id,
            price: 450_000_000,
        },
    )
    .await?
    .data
    .expect("quotation");
    assert_eq!(quotation.status, QuotationStatus::Pending);
    assert_eq!(quotation.dealer_id, dealer_id);

    let premature = sales_service::accept_quotation(&state, &buyer, quotation.id).await;
    assert!(matches!(premature, Err(AppError::InvalidState(_))));

    let approved = sales_service::approve_quotation(&state, &staff, quotation.id)
        .await?
        .data
        .expect("quotation");
    assert_eq!(approved.status, QuotationStatus::Approved);

    let accepted = sales_service::accept_quotation(&state, &buyer, quotation.id)
        .await?
        .data
        .expect("accepted");
    assert_eq!(accepted.quotation.status, QuotationStatus::Accepted);
    assert_eq!(accepted.order.status, OrderStatus::Pending);
    assert_eq!(accepted.order.quotation_id, Some(quotation.id));
    let order_id = accepted.order.id;

    let signed = sales_service::create_sales_contract(
        &state,
        &staff,
        order_id,
        CreateSalesContractRequest {
            total_amount: 450_000_000,
            terms: Some("Delivery within 30 days".to_string()),
        },
    )
    .await?
    .data
    .expect("contract");
    assert_eq!(signed.order.status, OrderStatus::ContractSigned);
    assert_eq!(signed.contract.total_amount, 450_000_000);

    let quotation = sales_service::get_quotation(&state, &staff, quotation.id)
        .await?
        .data
        .expect("quotation");
    assert_eq!(quotation.status, QuotationStatus::ContractSigned);

    let again = sales_service::create_sales_contract(
        &state,
        &staff,
        order_id,
        CreateSalesContractRequest {
            total_amount: 450_000_000,
            terms: None,
        },
    )
    .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    // The contract total replaces the list price.
    let balance = sales_service::get_balance(&state, &staff, order_id).await?.data.expect("balance");
    assert_eq!(balance.total, 450_000_000);
    assert_eq!(balance.remaining_balance, 450_000_000);
    Ok(())
}
