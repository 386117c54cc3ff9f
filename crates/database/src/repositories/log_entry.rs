//! 进度日志仓库
//!
//! 负责 `hsma_project_progress` 表的插入和全量读取

use crate::models::log_entry::LogEntry;
use crate::repositories::traits::LogEntryRepositoryTrait;
use crate::DatabaseResult;
use shared_lib::LOG_TABLE_NAME;
use sqlx::PgPool;
use tracing::debug;

/// 进度日志仓库结构体
#[derive(Debug, Clone)]
pub struct LogEntryRepository {
    pool: PgPool,
}

impl LogEntryRepository {
    /// 创建新的日志仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LogEntryRepositoryTrait for LogEntryRepository {
    /// 插入一条日志
    ///
    /// 使用 `RETURNING` 拿到实际写入的数据，存储没有返回行时得到 `None`。
    ///
    /// # SQL 说明
    ///
    /// 这里没有使用 `query_as!` 宏，因为编译时无法访问托管数据库。
    /// 参数依然通过预处理语句绑定，不存在SQL注入问题。
    async fn insert_entry(&self, entry: &LogEntry) -> DatabaseResult<Option<LogEntry>> {
        debug!("📝 写入日志: 项目 {} / {}", entry.project_code, entry.entry_type);

        let sql = format!(
            r#"
            INSERT INTO {LOG_TABLE_NAME} (created_at, project_code, submitter, entry_type, entry)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING created_at, project_code, submitter, entry_type, entry;
            "#
        );

        let written = sqlx::query_as::<_, LogEntry>(&sql)
            .bind(entry.created_at)
            .bind(entry.project_code)
            .bind(&entry.submitter)
            .bind(&entry.entry_type)
            .bind(&entry.entry)
            .fetch_optional(&self.pool)
            .await?;

        debug!("✅ 写入完成: {}", written.is_some());
        Ok(written)
    }

    /// 读取全部日志
    ///
    /// 每次都是全表读取，数据量在一个培训批次的范围内可以接受。
    async fn list_entries(&self) -> DatabaseResult<Vec<LogEntry>> {
        let sql = format!(
            r#"
            SELECT created_at, project_code, submitter, entry_type, entry
            FROM {LOG_TABLE_NAME};
            "#
        );

        let entries = sqlx::query_as::<_, LogEntry>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!("🔍 读取日志完成 - 共 {} 条", entries.len());
        Ok(entries)
    }
}
