//! 进度日志仓库 trait 定义

use crate::models::log_entry::LogEntry;
use crate::DatabaseResult;

/// 进度日志仓库trait定义
///
/// 远端行存储只暴露两个操作：
/// - 插入单行，返回写入后的数据
/// - 读取全部行
///
/// 没有更新和删除。
#[async_trait::async_trait]
pub trait LogEntryRepositoryTrait: Send + Sync + 'static {
    /// 插入一条日志
    ///
    /// # 返回值
    /// - `Ok(Some(entry))`: 存储确认写入，返回写入的数据
    /// - `Ok(None)`: 存储没有返回写入数据，调用方视为写入失败
    /// - `Err(_)`: 写入过程中出错
    async fn insert_entry(&self, entry: &LogEntry) -> DatabaseResult<Option<LogEntry>>;

    /// 读取日志表中的全部记录
    async fn list_entries(&self) -> DatabaseResult<Vec<LogEntry>>;
}
