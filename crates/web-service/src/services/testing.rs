//! 测试用的内存日志存储

use database::{DatabaseError, DatabaseResult, LogEntry, LogEntryRepositoryTrait};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
enum Failure {
    /// 返回错误
    Error,
    /// 不报错但也不返回写入数据
    Silent,
}

#[derive(Debug, Default)]
struct StoreState {
    rows: Vec<LogEntry>,
    attempts: usize,
    /// 前N次写入失败
    failing_first: usize,
    failure: Option<Failure>,
    always_fail: bool,
    /// 写入这些类型时总是失败
    failing_types: Vec<String>,
    fail_reads: bool,
}

/// 可配置失败方式的内存存储
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    state: Mutex<StoreState>,
}

impl FlakyStore {
    pub(crate) fn reliable() -> Self {
        Self::default()
    }

    pub(crate) fn failing_first(n: usize) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.failing_first = n;
            state.failure = Some(Failure::Error);
        }
        store
    }

    pub(crate) fn silent_first(n: usize) -> Self {
        let store = Self::failing_first(n);
        store.state.lock().unwrap().failure = Some(Failure::Silent);
        store
    }

    pub(crate) fn always_failing() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().always_fail = true;
        store
    }

    pub(crate) fn failing_for(entry_type: &str) -> Self {
        let store = Self::default();
        store
            .state
            .lock()
            .unwrap()
            .failing_types
            .push(entry_type.to_string());
        store
    }

    pub(crate) fn with_rows(rows: Vec<LogEntry>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().rows = rows;
        store
    }

    pub(crate) fn failing_reads(self) -> Self {
        self.state.lock().unwrap().fail_reads = true;
        self
    }

    pub(crate) fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }

    pub(crate) fn rows(&self) -> Vec<LogEntry> {
        self.state.lock().unwrap().rows.clone()
    }
}

#[async_trait::async_trait]
impl LogEntryRepositoryTrait for FlakyStore {
    async fn insert_entry(&self, entry: &LogEntry) -> DatabaseResult<Option<LogEntry>> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;

        let failure = if state.always_fail || state.failing_types.contains(&entry.entry_type) {
            Some(Failure::Error)
        } else if state.attempts <= state.failing_first {
            state.failure
        } else {
            None
        };

        match failure {
            Some(Failure::Error) => Err(DatabaseError::connection("store unavailable")),
            Some(Failure::Silent) => Ok(None),
            None => {
                state.rows.push(entry.clone());
                Ok(Some(entry.clone()))
            }
        }
    }

    async fn list_entries(&self) -> DatabaseResult<Vec<LogEntry>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(DatabaseError::connection("store unavailable"));
        }
        Ok(state.rows.clone())
    }
}
