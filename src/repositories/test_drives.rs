use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::{
    customers,
    test_drives::{ActiveModel, Column, Entity as TestDrives, Model, TestDriveStatus},
};

pub const ACTIVE_STATUSES: [TestDriveStatus; 2] =
    [TestDriveStatus::Scheduled, TestDriveStatus::Confirmed];

#[derive(Debug, Default, Clone)]
pub struct TestDriveFilter {
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub status: Option<TestDriveStatus>,
    pub active_only: bool,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TestDriveFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(dealer_id) = self.dealer_id {
            condition = condition.add(customers::Column::DealerId.eq(dealer_id));
        }
        if let Some(customer_id) = self.customer_id {
            condition = condition.add(Column::CustomerId.eq(customer_id));
        }
        if let Some(variant_id) = self.variant_id {
            condition = condition.add(Column::VariantId.eq(variant_id));
        }
        if let Some(status) = self.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if self.active_only {
            condition = condition.add(Column::Status.is_in(ACTIVE_STATUSES));
        }
        if let Some(from) = self.from {
            condition = condition.add(Column::ScheduledDate.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(Column::ScheduledDate.lte(to));
        }
        condition
    }

    fn select(&self) -> sea_orm::Select<TestDrives> {
        TestDrives::find()
            .inner_join(customers::Entity)
            .filter(self.condition())
    }
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    TestDrives::find_by_id(id).one(conn).await
}

pub async fn find_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Model>, DbErr> {
    TestDrives::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await
}

/// Active bookings on one day, the input of the slot conflict check.
pub async fn active_on_date<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
) -> Result<Vec<Model>, DbErr> {
    TestDrives::find()
        .filter(Column::ScheduledDate.eq(date))
        .filter(Column::Status.is_in(ACTIVE_STATUSES))
        .all(conn)
        .await
}

/// Every booking on one day in slot order.
pub async fn on_date<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
    dealer_id: Option<Uuid>,
    customer_id: Option<Uuid>,
) -> Result<Vec<Model>, DbErr> {
    let filter = TestDriveFilter {
        dealer_id,
        customer_id,
        from: Some(date),
        to: Some(date),
        ..Default::default()
    };
    filter
        .select()
        .order_by_asc(Column::ScheduledTime)
        .all(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &TestDriveFilter,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let finder = filter
        .select()
        .order_by_desc(Column::ScheduledDate)
        .order_by_desc(Column::ScheduledTime);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}

pub async fn list_all<C: ConnectionTrait>(
    conn: &C,
    filter: &TestDriveFilter,
) -> Result<Vec<Model>, DbErr> {
    filter
        .select()
        .order_by_desc(Column::ScheduledDate)
        .all(conn)
        .await
}

pub async fn count<C: ConnectionTrait>(conn: &C, filter: &TestDriveFilter) -> Result<u64, DbErr> {
    filter.select().count(conn).await
}

pub async fn exists_for_variant<C: ConnectionTrait>(conn: &C, variant_id: Uuid) -> Result<bool, DbErr> {
    Ok(TestDrives::find()
        .filter(Column::VariantId.eq(variant_id))
        .one(conn)
        .await?
        .is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    variant_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        variant_id: Set(variant_id),
        scheduled_date: Set(date),
        scheduled_time: Set(time),
        status: Set(TestDriveStatus::Scheduled),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(conn)
    .await
}

pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    test_drive: Model,
    status: TestDriveStatus,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = test_drive.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await
}
