use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::users::{ActiveModel, Column, Entity as Users, Model, Role};

pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub dealer_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Users::find_by_id(id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Model>, DbErr> {
    Users::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email.trim().to_lowercase()))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewUser) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(new.full_name),
        email: Set(new.email),
        phone: Set(new.phone),
        password_hash: Set(new.password_hash),
        role: Set(new.role),
        dealer_id: Set(new.dealer_id),
        manufacturer_id: Set(new.manufacturer_id),
        customer_id: Set(new.customer_id),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Users::find().count(conn).await
}
