use crate::{
    audit,
    dto::admin::AuditLogList,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::AuditLog,
    response::{ApiResponse, Meta},
    routes::params::AuditLogQuery,
    state::AppState,
};

pub async fn list_audit_logs(
    state: &AppState,
    user: &AuthUser,
    query: AuditLogQuery,
) -> AppResult<ApiResponse<AuditLogList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let (rows, total) = audit::list(
        &state.orm,
        query.action.as_deref(),
        limit as u64,
        offset as u64,
    )
    .await?;
    let items = rows.into_iter().map(AuditLog::from).collect();

    Ok(ApiResponse::success(
        "Audit logs",
        AuditLogList { items },
        Some(Meta::new(page, limit, total as i64)),
    ))
}
