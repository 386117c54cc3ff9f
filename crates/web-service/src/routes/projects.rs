//! 项目相关接口
//!

use crate::models::common::{ProjectInfo, ProjectLastUpdate, Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::feedback::LastUpdate;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use database::{LogEntryRepositoryTrait, ProjectRegistryTrait};
use tracing::debug;

/// 查询项目注册表
///
/// 返回按项目编号升序排列的全部项目，用于填充下拉框和展示注册表。
///
/// 注册表缓存60秒，过期后会重新读取一次表格；读取失败时返回502，不会使用过期数据。
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Project registry", body = ReplyList<ProjectInfo>),
        (status = 502, description = "Registry unavailable")
    ),
)]
pub async fn list_projects<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    let projects = state.controller.projects().await?;
    debug!("📋 返回 {} 个项目", projects.len());

    Ok(Json(ReplyList::new(projects.into_iter().map(Into::into).collect())))
}

/// 查询指定项目最近一次更新
///
/// 没有任何日志时 `last_update` 为 `null`
#[utoipa::path(get,
    path = "/projects/{code}/last-update",
    tag = "projects",
    params(("code" = i64, Path, description = "项目编号")),
    responses(
        (status = 200, description = "Most recent update", body = Reply<ProjectLastUpdate>)
    ),
)]
pub async fn get_last_update<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait>(
    State(state): State<AppState<LR, PR>>,
    Path(code): Path<i64>,
) -> Result<Json<Reply<ProjectLastUpdate>>, AppError> {
    debug!("🔍 查询项目 {} 最近更新", code);

    let last_update = state.controller.last_update(code).await?;

    Ok(Json(Reply {
        data: ProjectLastUpdate {
            project_code: code,
            description: LastUpdate::describe(last_update.as_ref()),
            last_update,
        },
    }))
}
