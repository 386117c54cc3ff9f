//! 数据访问模块
//!
//! 这个模块提供了两个外部数据源的访问能力：
//! - 进度日志表（Supabase/PostgreSQL）：插入单行、读取全部
//! - 项目注册表（Google Sheets）：只读，带TTL缓存

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, DatabasePool};
pub use error::DatabaseError;
pub use models::log_entry::LogEntry;
pub use models::project::{Project, RegistryRow};
pub use repositories::{
    log_entry::LogEntryRepository,
    registry::{CachedProjectRegistry, SheetProjectSource},
    traits::{LogEntryRepositoryTrait, ProjectRegistryTrait, ProjectSourceTrait},
};

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
