//! 业务常量定义模块
//!
//! 统一管理表名、默认重试参数等常量，
//! 确保写入端、读取端和配置加载使用的值保持一致。

/// 进度日志所在的表名
///
/// 每一行对应一次提交的 `LogEntry`，只会插入，从不更新或删除。
pub const LOG_TABLE_NAME: &str = "hsma_project_progress";

/// 页面标题
pub const PAGE_TITLE: &str = "HSMA Project Progress Reporter";

/// 项目下拉框的默认占位项
pub const NO_PROJECT_SELECTED: &str = "Please Select a Project";

/// 注册表缓存时间（秒）
pub const DEFAULT_REGISTRY_TTL_SECONDS: u64 = 60;

/// 单次读取注册表的超时时间（秒）
///
/// 刷新期间缓存写锁一直被持有，超时之后其他请求才能继续
pub const DEFAULT_REGISTRY_TIMEOUT_SECONDS: u64 = 10;

/// 快速提交的最大重试次数（不含首次尝试）
pub const DEFAULT_QUICK_MAX_RETRIES: u32 = 30;

/// 结构化提交中每个分类的最大重试次数（不含首次尝试）
pub const DEFAULT_STRUCTURED_MAX_RETRIES: u32 = 10;

/// 两次写入尝试之间的固定间隔（毫秒）
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// 重试耗尽后提示用户联系的人工渠道
pub const DEFAULT_ESCALATION_CONTACT: &str = "the HSMA programme team";
