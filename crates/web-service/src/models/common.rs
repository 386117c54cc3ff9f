use crate::models::feedback::LastUpdate;
use database::Project;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,
    #[schema(example = 24)]
    /// 总数
    pub total: u32,
}

impl<T> ReplyList<T> {
    pub fn new(data: Vec<T>) -> Self {
        let total = data.len() as u32;
        Self { data, total }
    }
}

/// 项目最近更新
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize, PartialEq, Eq)]
pub struct ProjectLastUpdate {
    #[schema(example = 7)]
    pub project_code: i64,

    /// 没有任何日志时为空
    pub last_update: Option<LastUpdate>,

    #[schema(example = "Last updated on 04/03/2026 at 09:05 UTC by Alex")]
    /// 页面展示用的文字
    pub description: String,
}

/// 注册表中的项目信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize, PartialEq, Eq)]
pub struct ProjectInfo {
    #[schema(example = 7)]
    /// 项目编号
    pub code: i64,

    #[schema(example = "Waiting list modelling")]
    /// 项目标题
    pub title: String,

    #[schema(example = "Alex")]
    /// 项目负责人
    pub lead: String,

    #[schema(example = "7: Waiting list modelling (Alex)")]
    /// 下拉框展示名称
    pub label: String,
}

impl From<Project> for ProjectInfo {
    fn from(project: Project) -> Self {
        Self {
            code: project.code,
            title: project.title,
            lead: project.lead,
            label: project.label,
        }
    }
}
