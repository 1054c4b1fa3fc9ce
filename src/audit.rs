use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::DbPool,
    entity::audit_logs::{Column, Entity as AuditLogs, Model},
    error::AppResult,
    middleware::auth::AuthUser,
    state::AppState,
};

pub async fn log_audit(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Records a mutating action by `user`. Failures are logged, never returned.
pub async fn record(state: &AppState, user: &AuthUser, action: &str, resource: &str, metadata: Value) {
    if let Err(err) = log_audit(&state.pool, Some(user.user_id), action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}

/// Newest entries first, optionally narrowed to one action.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    action: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Model>, u64), DbErr> {
    let mut finder = AuditLogs::find();
    if let Some(action) = action.filter(|a| !a.is_empty()) {
        finder = finder.filter(Column::Action.eq(action));
    }
    let finder = finder.order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(conn).await?;
    let items = finder.limit(limit).offset(offset).all(conn).await?;
    Ok((items, total))
}
