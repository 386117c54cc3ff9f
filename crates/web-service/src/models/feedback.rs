//! 处理函数的返回结构
//!
//! 每个表单操作都返回 [`FormOutcome`]：新的表单状态、反馈信息、
//! 最近更新信息和需要前端执行的副作用命令。

use crate::models::form::FormState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    None,
    Success,
    Warning,
}

/// 展示给用户的反馈信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackMessage {
    pub kind: FeedbackKind,
    pub text: String,
}

impl FeedbackMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Warning,
            text: text.into(),
        }
    }
}

/// 项目最近一次更新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LastUpdate {
    pub timestamp: DateTime<Utc>,
    #[schema(example = "Sam")]
    pub submitter: String,
}

impl LastUpdate {
    /// 页面上 "last updated" 一行的文字
    pub fn describe(update: Option<&LastUpdate>) -> String {
        match update {
            Some(u) => format!(
                "Last updated on {} by {}",
                u.timestamp.format("%d/%m/%Y at %H:%M UTC"),
                u.submitter
            ),
            None => "No updates have been logged for this project yet".to_string(),
        }
    }
}

/// 需要前端适配层执行的副作用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    /// 写入成功后的庆祝动画，前端可以忽略
    Celebrate,
    CopyToClipboard { text: String },
    Toast { text: String },
}

/// 表单操作结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormOutcome {
    pub form: FormState,
    pub feedback: Vec<FeedbackMessage>,
    pub last_update: Option<LastUpdate>,
    /// 未选择项目时为空
    pub last_update_line: String,
    pub commands: Vec<SideEffect>,
}

impl FormOutcome {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn with_last_update(mut self, last_update: Option<LastUpdate>) -> Self {
        self.last_update_line = LastUpdate::describe(last_update.as_ref());
        self.last_update = last_update;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_describe_last_update() {
        let update = LastUpdate {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 4, 9, 5, 0).unwrap(),
            submitter: "Alex".to_string(),
        };
        assert_eq!(
            LastUpdate::describe(Some(&update)),
            "Last updated on 04/03/2026 at 09:05 UTC by Alex"
        );
        assert!(LastUpdate::describe(None).starts_with("No updates"));
    }

    #[test]
    fn test_side_effect_wire_format() {
        let json = serde_json::to_value(SideEffect::Toast {
            text: "Copied!".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "toast", "text": "Copied!"}));
    }
}
