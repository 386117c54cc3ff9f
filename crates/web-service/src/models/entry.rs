//! 日志类型定义
//!
//! 快速提交只有一种类型，结构化提交按固定分类拆成多条日志

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// 结构化提交的分类，顺序即页面展示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StructuredCategory {
    /// 唯一的必填分类
    Progress,
    Meetings,
    Challenges,
    Successes,
    NextSteps,
    Other,
}

impl StructuredCategory {
    pub const ALL: [StructuredCategory; 6] = [
        StructuredCategory::Progress,
        StructuredCategory::Meetings,
        StructuredCategory::Challenges,
        StructuredCategory::Successes,
        StructuredCategory::NextSteps,
        StructuredCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StructuredCategory::Progress => "Progress",
            StructuredCategory::Meetings => "Meetings",
            StructuredCategory::Challenges => "Challenges",
            StructuredCategory::Successes => "Successes",
            StructuredCategory::NextSteps => "Next Steps",
            StructuredCategory::Other => "Other",
        }
    }
}

/// 写入日志表 `entry_type` 列的值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Simple,
    Structured(StructuredCategory),
}

impl EntryType {
    /// 用于反馈信息的简短名称
    pub fn short_label(self) -> &'static str {
        match self {
            EntryType::Simple => "update",
            EntryType::Structured(category) => category.label(),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Simple => write!(f, "Simple Log"),
            EntryType::Structured(category) => write!(f, "Structured Log - {}", category.label()),
        }
    }
}
