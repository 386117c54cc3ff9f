//! 🔧 共享库模块
//!
//! 这个模块包含了在多个crate之间共享的通用代码，包括：
//! - 程序配置
//! - 业务常量（表名、重试默认值、注册表缓存时间）

pub mod models;

// 重新导出常用类型
pub use models::{
    AppConfig, RegistryConfig, RetryConfig,
    // 业务常量
    DEFAULT_ESCALATION_CONTACT, DEFAULT_QUICK_MAX_RETRIES, DEFAULT_REGISTRY_TIMEOUT_SECONDS,
    DEFAULT_REGISTRY_TTL_SECONDS,    DEFAULT_RETRY_DELAY_MS, DEFAULT_STRUCTURED_MAX_RETRIES, LOG_TABLE_NAME, NO_PROJECT_SELECTED,
    PAGE_TITLE,
};
