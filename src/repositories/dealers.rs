use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::dealers::{ActiveModel, Column, Entity as Dealers, Model};

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Dealers::find_by_id(id).one(conn).await
}

/// Alphabetical first dealer, the default home of self-registered customers.
pub async fn first_by_name<C: ConnectionTrait>(conn: &C) -> Result<Option<Model>, DbErr> {
    Dealers::find().order_by_asc(Column::Name).one(conn).await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let finder = Dealers::find().order_by_asc(Column::Name);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Dealers::find().count(conn).await
}

pub async fn email_taken<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut condition = Condition::all()
        .add(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email.trim().to_lowercase()));
    if let Some(id) = exclude_id {
        condition = condition.add(Column::Id.ne(id));
    }
    Ok(Dealers::find().filter(condition).one(conn).await?.is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        phone: Set(phone),
        address: Set(address),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, dealer: Model) -> Result<(), DbErr> {
    dealer.delete(conn).await?;
    Ok(())
}
