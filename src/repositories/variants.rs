use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::like_pattern;
use crate::entity::{
    vehicle_models,
    vehicle_variants::{ActiveModel, Column, Entity as VehicleVariants, Model},
};

pub struct NewVariant {
    pub model_id: Uuid,
    pub version: String,
    pub color: Option<String>,
    pub product_year: Option<i32>,
    pub price: i64,
    pub quantity: i32,
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    VehicleVariants::find_by_id(id).one(conn).await
}

/// Serializes concurrent bookings of the same vehicle.
pub async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Model>, DbErr> {
    VehicleVariants::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await
}

/// Matches `term` against version, color or model name. Each variant comes
/// back with its model.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    model_id: Option<Uuid>,
    term: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<(Model, Option<vehicle_models::Model>)>, u64), DbErr> {
    let mut condition = Condition::all();
    if let Some(model_id) = model_id {
        condition = condition.add(Column::ModelId.eq(model_id));
    }
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((VehicleVariants, Column::Version)).ilike(pattern.clone()))
                .add(Expr::col((VehicleVariants, Column::Color)).ilike(pattern.clone()))
                .add(Expr::col((vehicle_models::Entity, vehicle_models::Column::Name)).ilike(pattern)),
        );
    }
    let total = VehicleVariants::find()
        .inner_join(vehicle_models::Entity)
        .filter(condition.clone())
        .count(conn)
        .await?;
    let items = VehicleVariants::find()
        .find_also_related(vehicle_models::Entity)
        .filter(condition)
        .order_by_asc(Column::Version)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;
    Ok((items, total))
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    VehicleVariants::find().count(conn).await
}

pub async fn exists_for_model<C: ConnectionTrait>(conn: &C, model_id: Uuid) -> Result<bool, DbErr> {
    Ok(VehicleVariants::find()
        .filter(Column::ModelId.eq(model_id))
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: NewVariant) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        model_id: Set(new.model_id),
        version: Set(new.version),
        color: Set(new.color),
        product_year: Set(new.product_year),
        price: Set(new.price),
        quantity: Set(new.quantity),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, variant: Model) -> Result<(), DbErr> {
    variant.delete(conn).await?;
    Ok(())
}
