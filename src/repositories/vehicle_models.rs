use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::like_pattern;
use crate::entity::{
    manufacturers,
    vehicle_models::{ActiveModel, Column, Entity as VehicleModels, Model},
};

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    VehicleModels::find_by_id(id).one(conn).await
}

/// Matches `term` against model name, category or manufacturer name.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    manufacturer_id: Option<Uuid>,
    term: Option<&str>,
) -> Result<Vec<(Model, Option<manufacturers::Model>)>, DbErr> {
    let mut condition = Condition::all();
    if let Some(manufacturer_id) = manufacturer_id {
        condition = condition.add(Column::ManufacturerId.eq(manufacturer_id));
    }
    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((VehicleModels, Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((VehicleModels, Column::Category)).ilike(pattern.clone()))
                .add(Expr::col((manufacturers::Entity, manufacturers::Column::Name)).ilike(pattern)),
        );
    }
    VehicleModels::find()
        .find_also_related(manufacturers::Entity)
        .filter(condition)
        .order_by_asc(Column::Name)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    VehicleModels::find().count(conn).await
}

pub async fn exists_for_manufacturer<C: ConnectionTrait>(
    conn: &C,
    manufacturer_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(VehicleModels::find()
        .filter(Column::ManufacturerId.eq(manufacturer_id))
        .one(conn)
        .await?
        .is_some())
}

/// Number of models per manufacturer id.
pub async fn counts_by_manufacturer<C: ConnectionTrait>(
    conn: &C,
) -> Result<HashMap<Uuid, i64>, DbErr> {
    let rows: Vec<(Uuid, i64)> = VehicleModels::find()
        .select_only()
        .column(Column::ManufacturerId)
        .column_as(Expr::cust("COUNT(*)::BIGINT"), "models")
        .group_by(Column::ManufacturerId)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(rows.into_iter().collect())
}

/// Whether the manufacturer already has a model called `name`, ignoring case.
pub async fn name_taken<C: ConnectionTrait>(
    conn: &C,
    manufacturer_id: Uuid,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut condition = Condition::all()
        .add(Column::ManufacturerId.eq(manufacturer_id))
        .add(Expr::expr(Func::lower(Expr::col(Column::Name))).eq(name.trim().to_lowercase()));
    if let Some(id) = exclude_id {
        condition = condition.add(Column::Id.ne(id));
    }
    Ok(VehicleModels::find()
        .filter(condition)
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    manufacturer_id: Uuid,
    name: String,
    category: Option<String>,
    image_url: Option<String>,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        manufacturer_id: Set(manufacturer_id),
        name: Set(name),
        category: Set(category),
        image_url: Set(image_url),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(conn: &C, active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, model: Model) -> Result<(), DbErr> {
    model.delete(conn).await?;
    Ok(())
}
