use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement, Value,
};
use uuid::Uuid;

use crate::entity::orders::{ActiveModel, Column, Entity as Orders, Model, OrderStatus};

#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    /// Empty means any status.
    pub statuses: Vec<OrderStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn for_dealer(dealer_id: Uuid) -> Self {
        Self {
            dealer_id: Some(dealer_id),
            ..Default::default()
        }
    }

    pub fn for_customer(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    pub fn with_statuses(mut self, statuses: &[OrderStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(dealer_id) = self.dealer_id {
            condition = condition.add(Column::DealerId.eq(dealer_id));
        }
        if let Some(customer_id) = self.customer_id {
            condition = condition.add(Column::CustomerId.eq(customer_id));
        }
        if let Some(variant_id) = self.variant_id {
            condition = condition.add(Column::VariantId.eq(variant_id));
        }
        if !self.statuses.is_empty() {
            condition = condition.add(Column::Status.is_in(self.statuses.clone()));
        }
        if let Some(from) = self.from {
            condition = condition.add(Column::OrderDate.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(Column::OrderDate.lte(to));
        }
        condition
    }
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Orders::find_by_id(id).one(conn).await
}

/// Lock the order row until the surrounding transaction ends.
pub async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await
}

/// Newest first, with the total row count for paging.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &OrderFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let finder = Orders::find()
        .filter(filter.condition())
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn list_all<C: ConnectionTrait>(
    conn: &C,
    filter: &OrderFilter,
) -> Result<Vec<Model>, DbErr> {
    Orders::find()
        .filter(filter.condition())
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C, filter: &OrderFilter) -> Result<u64, DbErr> {
    Orders::find().filter(filter.condition()).count(conn).await
}

pub async fn exists<C: ConnectionTrait>(conn: &C, filter: &OrderFilter) -> Result<bool, DbErr> {
    Ok(Orders::find()
        .filter(filter.condition())
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dealer_id: Uuid,
    customer_id: Uuid,
    variant_id: Uuid,
    quotation_id: Option<Uuid>,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        dealer_id: Set(dealer_id),
        customer_id: Set(customer_id),
        variant_id: Set(variant_id),
        quotation_id: Set(quotation_id),
        status: Set(OrderStatus::Pending),
        order_date: Set(Utc::now().date_naive()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    order: Model,
    status: OrderStatus,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = order.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await
}

const ORDER_TOTAL_SQL: &str = "COALESCE(sc.total_amount, v.price)";

/// Sum of order totals (contract amount, else variant price) for Completed
/// orders matching the optional dealer, customer and date bounds.
pub async fn completed_sales_total<C: ConnectionTrait>(
    conn: &C,
    dealer_id: Option<Uuid>,
    customer_id: Option<Uuid>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<i64, DbErr> {
    let sql = format!(
        r#"
        SELECT COALESCE(SUM({ORDER_TOTAL_SQL}), 0)::BIGINT AS total
        FROM orders o
        JOIN vehicle_variants v ON v.id = o.variant_id
        LEFT JOIN sales_contracts sc ON sc.order_id = o.id
        WHERE o.status = 'Completed'
          AND ($1::uuid IS NULL OR o.dealer_id = $1)
          AND ($2::uuid IS NULL OR o.customer_id = $2)
          AND ($3::date IS NULL OR o.order_date >= $3)
          AND ($4::date IS NULL OR o.order_date <= $4)
        "#
    );
    let values: Vec<Value> = vec![dealer_id.into(), customer_id.into(), from.into(), to.into()];
    sum_query(conn, &sql, values).await
}

/// Sum of unpaid balances over the customer's orders that are neither
/// Completed nor Rejected.
pub async fn outstanding_balance<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
) -> Result<i64, DbErr> {
    let sql = format!(
        r#"
        SELECT COALESCE(SUM({ORDER_TOTAL_SQL} - COALESCE(p.paid, 0)), 0)::BIGINT AS total
        FROM orders o
        JOIN vehicle_variants v ON v.id = o.variant_id
        LEFT JOIN sales_contracts sc ON sc.order_id = o.id
        LEFT JOIN (
            SELECT order_id, SUM(amount) AS paid FROM payments GROUP BY order_id
        ) p ON p.order_id = o.id
        WHERE o.customer_id = $1
          AND o.status NOT IN ('Completed', 'Rejected')
        "#
    );
    sum_query(conn, &sql, vec![customer_id.into()]).await
}

async fn sum_query<C: ConnectionTrait>(
    conn: &C,
    sql: &str,
    values: Vec<Value>,
) -> Result<i64, DbErr> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .await?;
    match row {
        Some(row) => row.try_get::<i64>("", "total"),
        None => Ok(0),
    }
}
