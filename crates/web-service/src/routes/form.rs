//! 表单操作接口
//!
//! 请求体是当前的 [`FormState`]，返回 [`FormOutcome`]，客户端用返回的 `form` 覆盖本地状态。
//!
//! 校验失败、写入失败都体现在 `feedback` 中，HTTP 状态依然是200。

use crate::models::err::AppError;
use crate::models::feedback::FormOutcome;
use crate::models::form::{ExportRequest, FormState};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use database::{LogEntryRepositoryTrait, ProjectRegistryTrait};
use tracing::debug;

/// 快速提交
///
/// 写入一条 `Simple Log`。存储不可用时会按固定间隔重试，期间请求不会返回。
#[utoipa::path(post,
    path = "/form/submit-quick",
    tag = "form",
    request_body = FormState,
    responses(
        (status = 200, description = "Submission result", body = FormOutcome)
    ),
)]
pub async fn submit_quick<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Json(form): Json<FormState>,
) -> Json<FormOutcome> {
    debug!("📝 快速提交 {:#?}", form);
    Json(state.controller.submit_quick(form).await)
}

/// 结构化提交
///
/// 每个有内容的分类写入一条日志。各分类互相独立，部分成功时已写入的分类不会回滚。
#[utoipa::path(post,
    path = "/form/submit-structured",
    tag = "form",
    request_body = FormState,
    responses(
        (status = 200, description = "Submission result", body = FormOutcome)
    ),
)]
pub async fn submit_structured<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Json(form): Json<FormState>,
) -> Json<FormOutcome> {
    debug!("📝 结构化提交 {:#?}", form);
    Json(state.controller.submit_structured(form).await)
}

/// 刷新最近更新信息
#[utoipa::path(post,
    path = "/form/refresh",
    tag = "form",
    request_body = FormState,
    responses(
        (status = 200, description = "Refreshed state", body = FormOutcome)
    ),
)]
pub async fn refresh_form<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Json(form): Json<FormState>,
) -> Result<Json<FormOutcome>, AppError> {
    Ok(Json(state.controller.refresh(form).await?))
}

/// 清空所有文本框
#[utoipa::path(post,
    path = "/form/clear",
    tag = "form",
    request_body = FormState,
    responses(
        (status = 200, description = "Cleared state", body = FormOutcome)
    ),
)]
pub async fn clear_form<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Json(form): Json<FormState>,
) -> Json<FormOutcome> {
    Json(state.controller.clear_fields(form))
}

/// 导出到剪贴板
///
/// 返回 `copy_to_clipboard` 命令，由页面完成实际的复制。
///
/// 请求中带上 `project_label` 时不会访问注册表；注册表不可用时使用项目编号，不会返回错误。
#[utoipa::path(post,
    path = "/form/export",
    tag = "form",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Clipboard commands", body = FormOutcome)
    ),
)]
pub async fn export_form<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Json(request): Json<ExportRequest>,
) -> Json<FormOutcome> {
    let outcome = state
        .controller
        .export(request.form, request.mode, request.format, request.project_label)
        .await;
    Json(outcome)
}
