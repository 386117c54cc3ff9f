//! 项目更新历史
//!
//! 全表读取后在内存中过滤，数据量在一个培训批次内可以接受

use crate::models::feedback::LastUpdate;
use database::{DatabaseResult, LogEntryRepositoryTrait};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct UpdateHistoryReader<LR: LogEntryRepositoryTrait> {
    repository: Arc<LR>,
}

impl<LR: LogEntryRepositoryTrait> UpdateHistoryReader<LR> {
    pub fn new(repository: Arc<LR>) -> Self {
        Self { repository }
    }

    /// 查询项目最近一次更新
    ///
    /// 只读，可以重复调用
    #[instrument(skip(self))]
    pub async fn fetch_last_update(&self, project_code: i64) -> DatabaseResult<Option<LastUpdate>> {
        let mut entries: Vec<_> = self
            .repository
            .list_entries()
            .await?
            .into_iter()
            .filter(|e| e.project_code == project_code)
            .collect();
        entries.sort_by_key(|e| Reverse(e.created_at));

        debug!("🔍 项目 {} 共有 {} 条日志", project_code, entries.len());

        Ok(entries.into_iter().next().map(|e| LastUpdate {
            timestamp: e.created_at,
            submitter: e.submitter,
        }))
    }
}
