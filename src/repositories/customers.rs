use chrono::NaiveDate;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::like_pattern;
use crate::entity::customers::{ActiveModel, Column, Entity as Customers, Model};

pub struct NewCustomer {
    pub dealer_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Customers::find_by_id(id).one(conn).await
}

pub async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Customers::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await
}

/// Case-insensitive email match.
pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Model>, DbErr> {
    Customers::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email.trim().to_lowercase()))
        .one(conn)
        .await
}

/// Name, email or phone contains `term`; optionally limited to one dealer.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    dealer_id: Option<Uuid>,
    term: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let mut condition = Condition::all();
    if let Some(dealer_id) = dealer_id {
        condition = condition.add(Column::DealerId.eq(dealer_id));
    }
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::FullName).ilike(pattern.clone()))
                .add(Expr::col(Column::Email).ilike(pattern.clone()))
                .add(Expr::col(Column::Phone).ilike(pattern)),
        );
    }
    let finder = Customers::find()
        .filter(condition)
        .order_by_asc(Column::FullName);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn count_for_dealer<C: ConnectionTrait>(conn: &C, dealer_id: Uuid) -> Result<u64, DbErr> {
    Customers::find()
        .filter(Column::DealerId.eq(dealer_id))
        .count(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewCustomer) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        dealer_id: Set(new.dealer_id),
        full_name: Set(new.full_name),
        email: Set(new.email),
        phone: Set(new.phone),
        birthday: Set(new.birthday),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}
