//! 数据模型模块
//!
//! 这里定义与日志表、注册表行对应的结构体

pub mod log_entry;
pub mod project;

// 重新导出具体的模型
pub use log_entry::LogEntry;
pub use project::{Project, RegistryRow};
