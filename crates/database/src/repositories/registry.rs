//! 项目注册表
//!
//! - [`SheetProjectSource`]: 通过 Google Sheets values API 读取注册表
//! - [`CachedProjectRegistry`]: 在任意数据源之上加一层TTL缓存，负责排序和派生展示名称

use crate::models::project::{Project, RegistryRow};
use crate::repositories::traits::{ProjectRegistryTrait, ProjectSourceTrait};
use crate::{DatabaseError, DatabaseResult};
use serde::Deserialize;
use shared_lib::RegistryConfig;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const CODE_COLUMN: &str = "Project Code";
const TITLE_COLUMN: &str = "Project Title";
const LEAD_COLUMN: &str = "Lead";

/// Sheets values API 的返回结构
///
/// 第一行是表头，后面每一行是一条数据，行尾的空单元格会被省略
#[derive(Debug, Deserialize)]
struct SheetValues {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// 基于 Google Sheets 的注册表数据源
#[derive(Debug, Clone)]
pub struct SheetProjectSource {
    client: reqwest::Client,
    config: RegistryConfig,
}

impl SheetProjectSource {
    /// 创建数据源，HTTP请求使用配置中的超时时间
    pub fn new(config: RegistryConfig) -> DatabaseResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.sheet_id,
            self.config.range
        )
    }
}

#[async_trait::async_trait]
impl ProjectSourceTrait for SheetProjectSource {
    async fn read_rows(&self) -> DatabaseResult<Vec<RegistryRow>> {
        let url = self.values_url();
        debug!("📥 读取项目注册表: {}", url);

        let sheet: SheetValues = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_sheet_values(sheet.values)
    }
}

/// 把表格数据（首行为表头）转换为注册表行
///
/// 通过表头名称定位列，列顺序不影响结果。项目编号无法解析的行会被跳过。
pub(crate) fn parse_sheet_values(values: Vec<Vec<String>>) -> DatabaseResult<Vec<RegistryRow>> {
    let mut rows = values.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| DatabaseError::registry_format("注册表为空，缺少表头"))?;

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DatabaseError::registry_format(format!("注册表缺少列: {name}")))
    };
    let code_idx = column(CODE_COLUMN)?;
    let title_idx = column(TITLE_COLUMN)?;
    let lead_idx = column(LEAD_COLUMN)?;

    let mut parsed = Vec::new();
    for row in rows {
        let raw_code = cell(&row, code_idx);
        if raw_code.is_empty() {
            continue;
        }
        let Ok(project_code) = raw_code.parse::<i64>() else {
            warn!("⚠️ 跳过无法解析的项目编号: {:?}", raw_code);
            continue;
        };
        parsed.push(RegistryRow {
            project_code,
            project_title: cell(&row, title_idx),
            lead: cell(&row, lead_idx),
        });
    }

    Ok(parsed)
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default()
}

struct CachedProjects {
    fetched_at: Instant,
    projects: Vec<Project>,
}

/// 带TTL缓存的项目注册表
///
/// 缓存命中时直接返回；过期后读取一次数据源并重新排序、派生展示名称。
/// 读取失败直接返回错误，不会回退到过期数据。
///
/// 刷新时持有写锁，单次读取受 `read_timeout` 限制，数据源卡住时等待中的请求也会在超时后返回。
pub struct CachedProjectRegistry<S: ProjectSourceTrait> {
    source: S,
    ttl: Duration,
    read_timeout: Duration,
    cache: RwLock<Option<CachedProjects>>,
}

impl<S: ProjectSourceTrait> CachedProjectRegistry<S> {
    pub fn new(source: S, ttl: Duration, read_timeout: Duration) -> Self {
        Self {
            source,
            ttl,
            read_timeout,
            cache: RwLock::new(None),
        }
    }

    fn fresh(&self, cached: &Option<CachedProjects>) -> Option<Vec<Project>> {
        cached
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.projects.clone())
    }
}

#[async_trait::async_trait]
impl<S: ProjectSourceTrait> ProjectRegistryTrait for CachedProjectRegistry<S> {
    async fn fetch_projects(&self) -> DatabaseResult<Vec<Project>> {
        if let Some(projects) = self.fresh(&*self.cache.read().await) {
            return Ok(projects);
        }

        let mut cache = self.cache.write().await;
        // 等待写锁期间可能已经有其他请求刷新过了
        if let Some(projects) = self.fresh(&cache) {
            return Ok(projects);
        }

        let rows = tokio::time::timeout(self.read_timeout, self.source.read_rows())
            .await
            .map_err(|_| {
                warn!("⏰ 读取项目注册表超时 ({:?})", self.read_timeout);
                DatabaseError::RegistryTimeout(self.read_timeout)
            })??;

        let mut projects: Vec<Project> = rows
            .into_iter()
            .map(Project::from)
            .collect();
        projects.sort_by_key(|p| p.code);

        info!("🔄 项目注册表已刷新 - 共 {} 个项目", projects.len());

        *cache = Some(CachedProjects {
            fetched_at: Instant::now(),
            projects: projects.clone(),
        });
        Ok(projects)
    }
}
