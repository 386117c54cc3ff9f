//! 服务层模块
//!
//! 表单相关的业务逻辑，全部与页面渲染无关，可以直接单元测试

pub mod controller;
pub mod export;
pub mod history;
pub mod retry;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::FormController;
pub use history::UpdateHistoryReader;
pub use retry::{RetryPolicy, SubmissionPolicies};
pub use writer::{CandidateEntry, EntryOutcome, SubmissionHeader, SubmissionWriter, WriteFailure};
