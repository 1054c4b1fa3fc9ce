use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::{
    orders,
    payments::{ActiveModel, Column, Entity as Payments, Model},
};

pub const STATUS_COMPLETED: &str = "Completed";

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    amount: i64,
    method: &str,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order_id),
        amount: Set(amount),
        method: Set(method.to_string()),
        status: Set(STATUS_COMPLETED.to_string()),
        paid_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn list_for_order<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Payments::find()
        .filter(Column::OrderId.eq(order_id))
        .order_by_desc(Column::PaidAt)
        .all(conn)
        .await
}

/// Payments across every order of a customer, newest first.
pub async fn list_for_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Payments::find()
        .inner_join(orders::Entity)
        .filter(orders::Column::CustomerId.eq(customer_id))
        .order_by_desc(Column::PaidAt)
        .all(conn)
        .await
}

pub async fn total_paid_for_order<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
) -> Result<i64, DbErr> {
    let total: Option<i64> = Payments::find()
        .select_only()
        .column_as(Expr::cust("COALESCE(SUM(amount), 0)::BIGINT"), "total")
        .filter(Column::OrderId.eq(order_id))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.unwrap_or(0))
}
