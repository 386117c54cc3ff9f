//! 项目注册表模型
//!
//! 定义注册表原始行和派生出的项目结构体

use serde::Serialize;

/// 注册表中的一行原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRow {
    pub project_code: i64,
    pub project_title: String,
    pub lead: String,
}

/// 项目信息
///
/// `label` 由编号、标题和负责人派生，用于下拉框展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub code: i64,
    pub title: String,
    pub lead: String,
    pub label: String,
}

impl Project {
    pub fn new(code: i64, title: impl Into<String>, lead: impl Into<String>) -> Self {
        let title = title.into();
        let lead = lead.into();
        let label = format!("{code}: {title} ({lead})");
        Self { code, title, lead, label }
    }
}

impl From<RegistryRow> for Project {
    fn from(row: RegistryRow) -> Self {
        Project::new(row.project_code, row.project_title, row.lead)
    }
}
