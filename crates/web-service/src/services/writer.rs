//! 提交写入
//!
//! 把一次提交拆成一条或多条 [`LogEntry`]，逐条写入并按策略重试。
//! 多条之间互相独立：某一条彻底失败不会影响其他条目，已写入的条目也不会回滚。

use crate::models::entry::EntryType;
use crate::services::retry::{RetriesExhausted, RetryPolicy};
use chrono::{DateTime, Utc};
use database::{DatabaseError, LogEntry, LogEntryRepositoryTrait};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

/// 单次写入失败的原因
#[derive(Error, Debug)]
pub enum WriteFailure {
    /// 存储没有返回写入的数据
    #[error("store did not return the written row")]
    NoDataReturned,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// 一次提交中所有条目共享的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHeader {
    pub created_at: DateTime<Utc>,
    pub project_code: i64,
    pub submitter: String,
}

/// 待写入的条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub entry_type: EntryType,
    pub text: String,
}

impl CandidateEntry {
    pub fn new(entry_type: EntryType, text: impl Into<String>) -> Self {
        Self {
            entry_type,
            text: text.into(),
        }
    }
}

/// 单个条目的写入结果
#[derive(Debug)]
pub enum EntryOutcome {
    Written {
        entry_type: EntryType,
        entry: LogEntry,
    },
    /// 文本为空，没有写入
    Skipped { entry_type: EntryType },
    /// 重试耗尽
    Failed {
        entry_type: EntryType,
        attempts: u32,
        error: WriteFailure,
    },
}

/// 是否跳过空文本条目，只有结构化提交需要
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyEntries {
    Skip,
    Write,
}

pub struct SubmissionWriter<LR: LogEntryRepositoryTrait> {
    repository: Arc<LR>,
}

impl<LR: LogEntryRepositoryTrait> SubmissionWriter<LR> {
    pub fn new(repository: Arc<LR>) -> Self {
        Self { repository }
    }

    /// 按顺序写入所有条目
    ///
    /// 返回的结果与 `candidates` 一一对应
    #[instrument(skip(self, candidates), fields(project = header.project_code))]
    pub async fn write_entries(
        &self,
        header: &SubmissionHeader,
        candidates: Vec<CandidateEntry>,
        policy: RetryPolicy,
        empty: EmptyEntries,
    ) -> Vec<EntryOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let entry_type = candidate.entry_type;
            if empty == EmptyEntries::Skip && candidate.text.trim().is_empty() {
                outcomes.push(EntryOutcome::Skipped { entry_type });
                continue;
            }

            let entry = LogEntry {
                created_at: header.created_at,
                project_code: header.project_code,
                submitter: header.submitter.clone(),
                entry_type: entry_type.to_string(),
                entry: candidate.text,
            };

            let outcome = match self.write_one(&entry, policy).await {
                Ok(written) => {
                    info!("✅ 已写入 {}", entry_type);
                    EntryOutcome::Written {
                        entry_type,
                        entry: written,
                    }
                }
                Err(RetriesExhausted { attempts, last_error }) => {
                    error!("❌ {} 写入失败，已尝试 {} 次: {}", entry_type, attempts, last_error);
                    EntryOutcome::Failed {
                        entry_type,
                        attempts,
                        error: last_error,
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn write_one(
        &self,
        entry: &LogEntry,
        policy: RetryPolicy,
    ) -> Result<LogEntry, RetriesExhausted<WriteFailure>> {
        let repository = &self.repository;
        let what = format!("写入 {}", entry.entry_type);

        policy
            .run(&what, move || async move {
                repository
                    .insert_entry(entry)
                    .await?
                    .ok_or(WriteFailure::NoDataReturned)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::StructuredCategory;
    use crate::services::testing::FlakyStore;

    fn header() -> SubmissionHeader {
        SubmissionHeader {
            created_at: Utc::now(),
            project_code: 7,
            submitter: "Sam".to_string(),
        }
    }

    #[tokio::test]
    async fn test_retry_is_transparent() {
        let store = Arc::new(FlakyStore::failing_first(3));
        let writer = SubmissionWriter::new(store.clone());

        let outcomes = writer
            .write_entries(
                &header(),
                vec![CandidateEntry::new(EntryType::Simple, "Built the model")],
                RetryPolicy::immediate(30),
                EmptyEntries::Write,
            )
            .await;

        assert!(matches!(outcomes[0], EntryOutcome::Written { .. }));
        assert_eq!(store.attempts(), 4);
        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry_type, "Simple Log");
    }

    #[tokio::test]
    async fn test_exhaustion_writes_nothing() {
        let store = Arc::new(FlakyStore::always_failing());
        let writer = SubmissionWriter::new(store.clone());

        let outcomes = writer
            .write_entries(
                &header(),
                vec![CandidateEntry::new(EntryType::Simple, "Built the model")],
                RetryPolicy::immediate(30),
                EmptyEntries::Write,
            )
            .await;

        match &outcomes[0] {
            EntryOutcome::Failed { attempts, .. } => assert_eq!(*attempts, 31),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_missing_return_data_counts_as_failure() {
        let store = Arc::new(FlakyStore::silent_first(2));
        let writer = SubmissionWriter::new(store.clone());

        let outcomes = writer
            .write_entries(
                &header(),
                vec![CandidateEntry::new(EntryType::Simple, "Built the model")],
                RetryPolicy::immediate(1),
                EmptyEntries::Write,
            )
            .await;

        match &outcomes[0] {
            EntryOutcome::Failed { error, .. } => assert!(matches!(error, WriteFailure::NoDataReturned)),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_empty_structured_entries_skipped() {
        let store = Arc::new(FlakyStore::reliable());
        let writer = SubmissionWriter::new(store.clone());

        let outcomes = writer
            .write_entries(
                &header(),
                vec![
                    CandidateEntry::new(EntryType::Structured(StructuredCategory::Progress), "Done"),
                    CandidateEntry::new(EntryType::Structured(StructuredCategory::Meetings), "  "),
                ],
                RetryPolicy::immediate(10),
                EmptyEntries::Skip,
            )
            .await;

        assert!(matches!(outcomes[1], EntryOutcome::Skipped { .. }));
        assert_eq!(store.attempts(), 1);
        assert_eq!(store.rows()[0].entry_type, "Structured Log - Progress");
    }
}
