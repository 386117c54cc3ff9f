//! 数据仓库模块
//!
//! 这里定义日志表与注册表的Repository层

pub mod log_entry;
pub mod registry;
pub mod traits;

// 重新导出具体的类型
pub use log_entry::LogEntryRepository;
pub use registry::{CachedProjectRegistry, SheetProjectSource};
pub use traits::{LogEntryRepositoryTrait, ProjectRegistryTrait, ProjectSourceTrait};
