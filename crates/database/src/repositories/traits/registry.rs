//! 项目注册表 trait 定义

use crate::models::project::{Project, RegistryRow};
use crate::DatabaseResult;

/// 注册表原始数据源
///
/// 每次调用都会真正读取一次外部表格，不做任何缓存
#[async_trait::async_trait]
pub trait ProjectSourceTrait: Send + Sync + 'static {
    /// 读取注册表的全部数据行
    async fn read_rows(&self) -> DatabaseResult<Vec<RegistryRow>>;
}

/// 项目注册表读取接口
#[async_trait::async_trait]
pub trait ProjectRegistryTrait: Send + Sync + 'static {
    /// 获取按项目编号升序排列的项目列表
    async fn fetch_projects(&self) -> DatabaseResult<Vec<Project>>;
}
