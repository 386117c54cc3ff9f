//! 写入重试策略
//!
//! 固定间隔、有上限的串行重试。策略通过参数注入，测试时使用零间隔。

use shared_lib::RetryConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 首次失败后最多再尝试的次数
    pub max_retries: u32,
    /// 两次尝试之间的固定间隔
    pub delay: Duration,
}

/// 快速提交和结构化提交分别使用的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicies {
    pub quick: RetryPolicy,
    pub structured: RetryPolicy,
}

impl From<&RetryConfig> for SubmissionPolicies {
    fn from(config: &RetryConfig) -> Self {
        Self {
            quick: RetryPolicy::new(config.quick_max_retries, config.delay),
            structured: RetryPolicy::new(config.structured_max_retries, config.delay),
        }
    }
}

/// 重试耗尽
#[derive(Debug)]
pub struct RetriesExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// 零间隔策略
    pub fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, Duration::ZERO)
    }

    /// 包含首次尝试在内的总尝试次数
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// 执行 `op`，失败时按策略重试
    ///
    /// 每次失败都会打一条 `warn` 日志；全部失败后返回最后一次的错误。
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, RetriesExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts => {
                    warn!("⚠️ {} 第 {}/{} 次尝试失败: {}", what, attempt, max_attempts, err);
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(err) => {
                    return Err(RetriesExhausted {
                        attempts: attempt,
                        last_error: err,
                    })
                }
            }
        }
    }
}
