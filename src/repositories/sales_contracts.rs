use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::sales_contracts::{ActiveModel, Column, Entity as SalesContracts, Model};

pub const STATUS_ACTIVE: &str = "Active";

pub async fn find_by_order<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
) -> Result<Option<Model>, DbErr> {
    SalesContracts::find()
        .filter(Column::OrderId.eq(order_id))
        .one(conn)
        .await
}

/// Signed on the day it is drawn up.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    total_amount: i64,
    terms: Option<String>,
) -> Result<Model, DbErr> {
    let today = Utc::now().date_naive();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order_id),
        contract_date: Set(today),
        signed_date: Set(Some(today)),
        total_amount: Set(total_amount),
        terms: Set(terms),
        status: Set(STATUS_ACTIVE.to_string()),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}
