//! 表单状态
//!
//! 会话状态全部放在 [`FormState`] 里，由客户端持有，每次请求时传入，
//! 处理函数返回新的状态。服务端不保存任何会话数据。

use crate::models::entry::StructuredCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// 结构化提交的六个文本框
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StructuredFields {
    #[schema(example = "Finished the first version of the model")]
    /// 必填
    pub progress: String,
    pub meetings: String,
    pub challenges: String,
    pub successes: String,
    pub next_steps: String,
    pub other: String,
}

impl StructuredFields {
    pub fn get(&self, category: StructuredCategory) -> &str {
        match category {
            StructuredCategory::Progress => &self.progress,
            StructuredCategory::Meetings => &self.meetings,
            StructuredCategory::Challenges => &self.challenges,
            StructuredCategory::Successes => &self.successes,
            StructuredCategory::NextSteps => &self.next_steps,
            StructuredCategory::Other => &self.other,
        }
    }

    /// 按展示顺序遍历所有分类
    pub fn iter(&self) -> impl Iterator<Item = (StructuredCategory, &str)> + '_ {
        StructuredCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// 按展示顺序遍历有内容的分类
    pub fn filled(&self) -> impl Iterator<Item = (StructuredCategory, &str)> + '_ {
        self.iter().filter(|(_, text)| !text.trim().is_empty())
    }
}

/// 会话中的表单状态
///
/// - `project_code` 为空表示下拉框停留在 "Please Select a Project"
/// - 快速提交只读取 `quick_update`，结构化提交只读取 `structured`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FormState {
    #[schema(example = 7)]
    pub project_code: Option<i64>,

    #[schema(example = "Sam")]
    pub submitter: String,

    #[schema(example = "Cleaned the referral data and met with the service lead")]
    pub quick_update: String,

    pub structured: StructuredFields,
}

impl FormState {
    /// 清空所有文本框，保留已选项目和提交人
    pub fn cleared(self) -> Self {
        Self {
            quick_update: String::new(),
            structured: StructuredFields::default(),
            ..self
        }
    }

    /// 提交前的本地校验
    ///
    /// 校验顺序：项目 -> 提交人 -> 文本。只返回第一个失败项对应的提示。
    pub fn validate_for(&self, mode: FormMode) -> Result<ValidSubmission, ValidationError> {
        let text = match mode {
            FormMode::Quick => &self.quick_update,
            FormMode::Structured => &self.structured.progress,
        };
        let draft = SubmissionDraft {
            project_code: self.project_code,
            submitter: self.submitter.trim().to_string(),
            text: text.trim().to_string(),
        };

        if let Err(errors) = draft.validate() {
            let fields = errors.field_errors();
            let error = if fields.contains_key("project_code") {
                ValidationError::ProjectNotSelected
            } else if fields.contains_key("submitter") {
                ValidationError::SubmitterMissing
            } else {
                match mode {
                    FormMode::Quick => ValidationError::UpdateMissing,
                    FormMode::Structured => ValidationError::ProgressMissing,
                }
            };
            return Err(error);
        }

        let Some(project_code) = draft.project_code else {
            return Err(ValidationError::ProjectNotSelected);
        };
        Ok(ValidSubmission {
            project_code,
            submitter: draft.submitter,
        })
    }
}

#[derive(Debug, Validate)]
struct SubmissionDraft {
    #[validate(required)]
    project_code: Option<i64>,

    #[validate(length(min = 1))]
    submitter: String,

    #[validate(length(min = 1))]
    text: String,
}

/// 通过校验后的公共字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub project_code: i64,
    pub submitter: String,
}

/// 本地校验错误
///
/// 错误信息直接作为警告展示给用户
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a project before submitting your update.")]
    ProjectNotSelected,

    #[error("Please enter your name before submitting your update.")]
    SubmitterMissing,

    #[error("Please enter an update before submitting.")]
    UpdateMissing,

    #[error("Please fill in the Progress box before submitting - it is the only mandatory field.")]
    ProgressMissing,
}

/// 提交模式，对应页面上的两个标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Quick,
    Structured,
}

/// 剪贴板导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Markdown,
    PlainText,
}

/// 剪贴板导出请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub form: FormState,
    pub mode: FormMode,
    pub format: ExportFormat,

    /// 页面下拉框里已经展示的项目名称，传入后导出不再查询注册表
    #[serde(default)]
    #[schema(example = "7: Waiting list modelling (Alex)")]
    pub project_label: Option<String>,
}
