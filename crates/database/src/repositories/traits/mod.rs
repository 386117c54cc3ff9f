//! 数据仓库 trait 定义
//!
//! 这里定义了日志表与注册表的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send`：异步方法返回的 `Future` 需要在不同线程间传递
//! - `Sync`：同一个实例会被多个请求并发访问
//! - `'static`：作为 axum 共享状态长期存活
//!
//! 服务层通过泛型参数使用这些 trait（而不是 trait object），
//! 测试时可以替换为内存实现，比如一个前N次写入失败的假存储：
//!
//! ```rust,ignore
//! let writer = SubmissionWriter::new(Arc::new(FlakyStore::failing_first(3)));
//! let outcomes = writer
//!     .write_entries(&header, candidates, RetryPolicy::immediate(5), EmptyEntries::Write)
//!     .await;
//! ```

pub mod log_entry;
pub mod registry;

// 重新导出
pub use log_entry::LogEntryRepositoryTrait;
pub use registry::{ProjectRegistryTrait, ProjectSourceTrait};
