use chrono::NaiveDate;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::dealer_contracts::{ActiveModel, Column, Entity as DealerContracts, Model};

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    DealerContracts::find_by_id(id).one(conn).await
}

pub async fn list_for_dealer<C: ConnectionTrait>(
    conn: &C,
    dealer_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    DealerContracts::find()
        .filter(Column::DealerId.eq(dealer_id))
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    DealerContracts::find().count(conn).await
}

pub async fn exists_for_dealer<C: ConnectionTrait>(conn: &C, dealer_id: Uuid) -> Result<bool, DbErr> {
    Ok(DealerContracts::find()
        .filter(Column::DealerId.eq(dealer_id))
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dealer_id: Uuid,
    manufacturer_id: Uuid,
    target_sales: Option<i64>,
    credit_limit: Option<i64>,
    signed_date: Option<NaiveDate>,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        dealer_id: Set(dealer_id),
        manufacturer_id: Set(manufacturer_id),
        target_sales: Set(target_sales),
        credit_limit: Set(credit_limit),
        signed_date: Set(signed_date),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}
