use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::manufacturers::{ActiveModel, Column, Entity as Manufacturers, Model};

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Manufacturers::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Manufacturers::find()
        .order_by_asc(Column::Name)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Manufacturers::find().count(conn).await
}

/// Whether another manufacturer already uses `name`, ignoring case.
pub async fn name_taken<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut condition = Condition::all()
        .add(Expr::expr(Func::lower(Expr::col(Column::Name))).eq(name.trim().to_lowercase()));
    if let Some(id) = exclude_id {
        condition = condition.add(Column::Id.ne(id));
    }
    Ok(Manufacturers::find()
        .filter(condition)
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    name: String,
    country: Option<String>,
    address: Option<String>,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        country: Set(country),
        address: Set(address),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, manufacturer: Model) -> Result<(), DbErr> {
    manufacturer.delete(conn).await?;
    Ok(())
}
