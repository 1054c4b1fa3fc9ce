use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::quotations::{ActiveModel, Column, Entity as Quotations, Model, QuotationStatus};

#[derive(Debug, Default, Clone)]
pub struct QuotationFilter {
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub status: Option<QuotationStatus>,
}

impl QuotationFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(dealer_id) = self.dealer_id {
            condition = condition.add(Column::DealerId.eq(dealer_id));
        }
        if let Some(customer_id) = self.customer_id {
            condition = condition.add(Column::CustomerId.eq(customer_id));
        }
        if let Some(status) = self.status {
            condition = condition.add(Column::Status.eq(status));
        }
        condition
    }
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Quotations::find_by_id(id).one(conn).await
}

pub async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Quotations::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &QuotationFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let finder = Quotations::find()
        .filter(filter.condition())
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn count<C: ConnectionTrait>(conn: &C, filter: &QuotationFilter) -> Result<u64, DbErr> {
    Quotations::find().filter(filter.condition()).count(conn).await
}

pub async fn exists_for_variant<C: ConnectionTrait>(conn: &C, variant_id: Uuid) -> Result<bool, DbErr> {
    Ok(Quotations::find()
        .filter(Column::VariantId.eq(variant_id))
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    variant_id: Uuid,
    dealer_id: Uuid,
    price: i64,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        variant_id: Set(variant_id),
        dealer_id: Set(dealer_id),
        price: Set(price),
        status: Set(QuotationStatus::Pending),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    quotation: Model,
    status: QuotationStatus,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = quotation.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await
}
