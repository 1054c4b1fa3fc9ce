use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entity::{
    customers,
    feedbacks::{ActiveModel, Column, Entity as Feedbacks, Model},
};

#[derive(Debug, Default, Clone)]
pub struct FeedbackFilter {
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl FeedbackFilter {
    fn select(&self) -> sea_orm::Select<Feedbacks> {
        let mut condition = Condition::all();
        if let Some(dealer_id) = self.dealer_id {
            condition = condition.add(customers::Column::DealerId.eq(dealer_id));
        }
        if let Some(customer_id) = self.customer_id {
            condition = condition.add(Column::CustomerId.eq(customer_id));
        }
        if let Some(from) = self.from {
            condition = condition.add(Column::FeedbackDate.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(Column::FeedbackDate.lt(to));
        }
        Feedbacks::find()
            .inner_join(customers::Entity)
            .filter(condition)
    }
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    content: Option<String>,
    rating: i32,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        content: Set(content),
        rating: Set(rating),
        feedback_date: NotSet,
    }
    .insert(conn)
    .await
}

/// Newest first.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &FeedbackFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let finder = filter.select().order_by_desc(Column::FeedbackDate);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn list_all<C: ConnectionTrait>(
    conn: &C,
    filter: &FeedbackFilter,
) -> Result<Vec<Model>, DbErr> {
    filter
        .select()
        .order_by_desc(Column::FeedbackDate)
        .all(conn)
        .await
}

/// `None` when there is no feedback to average.
pub async fn average_rating<C: ConnectionTrait>(
    conn: &C,
    filter: &FeedbackFilter,
) -> Result<Option<f64>, DbErr> {
    let avg: Option<Option<f64>> = filter
        .select()
        .select_only()
        .column_as(Expr::cust("AVG(feedbacks.rating)::FLOAT8"), "avg")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(avg.flatten())
}
