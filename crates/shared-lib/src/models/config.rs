use crate::models::constants::{
    DEFAULT_ESCALATION_CONTACT, DEFAULT_QUICK_MAX_RETRIES, DEFAULT_REGISTRY_TIMEOUT_SECONDS,
    DEFAULT_REGISTRY_TTL_SECONDS,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_STRUCTURED_MAX_RETRIES,
};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::{Help, Result};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 项目注册表（Google Sheets）配置
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Sheets API 地址，测试时可以替换为本地服务
    ///
    /// 可通过环境变量 `REGISTRY_BASE_URL` 来调整
    pub base_url: String,

    /// 表格ID，对应环境变量 `REGISTRY_SHEET_ID`
    pub sheet_id: String,

    /// 读取范围，对应环境变量 `REGISTRY_RANGE`
    pub range: String,

    /// Sheets API key，对应环境变量 `REGISTRY_API_KEY`
    pub api_key: String,

    /// 注册表缓存时间
    pub ttl: Duration,

    /// 单次读取超时，对应环境变量 `REGISTRY_TIMEOUT_SECONDS`
    pub timeout: Duration,
}

/// 写入重试配置
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 快速提交的最大重试次数，对应环境变量 `QUICK_MAX_RETRIES`
    pub quick_max_retries: u32,

    /// 结构化提交每个分类的最大重试次数，对应环境变量 `STRUCTURED_MAX_RETRIES`
    pub structured_max_retries: u32,

    /// 重试间隔，对应环境变量 `RETRY_DELAY_MS`
    pub delay: Duration,
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// postgresql（Supabase）数据库链接字符串
    pub postgresql_conn_str: String,

    /// 监听地址
    pub bind_addr: String,

    /// 注册表配置
    pub registry: RegistryConfig,

    /// 重试配置
    pub retry: RetryConfig,

    /// 写入彻底失败后提示用户联系的人工渠道
    pub escalation_contact: String,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        info!(
            "⚙️ 配置加载完成 - 监听地址: {}, 注册表范围: {}",
            config.bind_addr, config.registry.range
        );
        Ok(Arc::new(config))
    }

    /// 从任意键值来源构造配置
    ///
    /// `load` 使用进程环境变量，测试时可以直接传入闭包。
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| eyre!("Can not load {key} in environment"))
                .suggestion(format!("设置 {key} 环境变量"))
        };

        let postgresql_conn_str = required("DATABASE_URL")?;
        let sheet_id = required("REGISTRY_SHEET_ID")?;
        let api_key = required("REGISTRY_API_KEY")?;

        let config = AppConfig {
            postgresql_conn_str,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            registry: RegistryConfig {
                base_url: lookup("REGISTRY_BASE_URL")
                    .unwrap_or_else(|| "https://sheets.googleapis.com".to_string()),
                sheet_id,
                range: lookup("REGISTRY_RANGE").unwrap_or_else(|| "Sheet1".to_string()),
                api_key,
                ttl: Duration::from_secs(parse_or(
                    &lookup,
                    "REGISTRY_TTL_SECONDS",
                    DEFAULT_REGISTRY_TTL_SECONDS,
                )?),
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "REGISTRY_TIMEOUT_SECONDS",
                    DEFAULT_REGISTRY_TIMEOUT_SECONDS,
                )?),
            },
            retry: RetryConfig {
                quick_max_retries: parse_or(&lookup, "QUICK_MAX_RETRIES", DEFAULT_QUICK_MAX_RETRIES)?,
                structured_max_retries: parse_or(
                    &lookup,
                    "STRUCTURED_MAX_RETRIES",
                    DEFAULT_STRUCTURED_MAX_RETRIES,
                )?,
                delay: Duration::from_millis(parse_or(&lookup, "RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?),
            },
            escalation_contact: lookup("ESCALATION_CONTACT")
                .unwrap_or_else(|| DEFAULT_ESCALATION_CONTACT.to_string()),
        };
        Ok(config)
    }
}

/// 读取可选的数字配置，未设置时使用默认值，设置了但无法解析则报错
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => {
            debug!("{key} 未设置，使用默认值");
            Ok(default)
        }
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid value {raw:?} for {key}"))
            .suggestion(format!("{key} 需要是一个非负整数")),
    }
}
