use std::time::Duration;
use thiserror::Error;

/// 数据访问错误类型
///
/// 覆盖日志表（PostgreSQL）和项目注册表（Google Sheets）两个外部数据源
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 注册表请求错误
    #[error("注册表请求错误: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 注册表内容不符合预期（缺少列等）
    #[error("注册表格式错误: {0}")]
    RegistryFormatError(String),

    /// 读取注册表超过了配置的超时时间
    #[error("读取注册表超时 ({0:?})")]
    RegistryTimeout(Duration),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建注册表格式错误
    pub fn registry_format<T: ToString>(msg: T) -> Self {
        Self::RegistryFormatError(msg.to_string())
    }
}
