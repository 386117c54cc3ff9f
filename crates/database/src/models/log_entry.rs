//! 进度日志数据库模型
//!
//! 与 `hsma_project_progress` 表一一对应

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一条已提交（或即将提交）的进度日志
///
/// 写入后不可变，表上没有更新和删除路径。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LogEntry {
    /// 提交时生成的UTC时间
    pub created_at: DateTime<Utc>,
    pub project_code: i64,
    pub submitter: String,
    /// `Simple Log` 或 `Structured Log - <分类>`
    pub entry_type: String,
    pub entry: String,
}
