//! 剪贴板导出
//!
//! 把尚未提交的内容格式化为 Markdown 或纯文本，方便用户粘贴到别处。
//! 纯格式化，不涉及任何存储和网络。

use crate::models::form::{ExportFormat, FormMode, FormState};
use chrono::NaiveDate;
use std::fmt::Write;

/// 导出文本的抬头信息
#[derive(Debug, Clone)]
pub struct ExportHeader<'a> {
    pub project_label: &'a str,
    pub date: NaiveDate,
}

/// 生成导出文本
pub fn render(form: &FormState, mode: FormMode, format: ExportFormat, header: &ExportHeader<'_>) -> String {
    let sections: Vec<(Option<&str>, &str)> = match mode {
        FormMode::Quick => vec![(None, form.quick_update.trim())]
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .collect(),
        FormMode::Structured => form
            .structured
            .filled()
            .map(|(category, text)| (Some(category.label()), text.trim()))
            .collect(),
    };

    let date = header.date.format("%d/%m/%Y");
    let submitter = form.submitter.trim();
    let mut out = String::new();

    // 写入String不会失败
    match format {
        ExportFormat::Markdown => {
            let _ = writeln!(out, "## Project Update: {}", header.project_label);
            let _ = writeln!(out, "**Date:** {date}");
            if !submitter.is_empty() {
                let _ = writeln!(out, "**Submitted by:** {submitter}");
            }
            for (title, text) in sections {
                out.push('\n');
                if let Some(title) = title {
                    let _ = writeln!(out, "### {title}");
                }
                let _ = writeln!(out, "{text}");
            }
        }
        ExportFormat::PlainText => {
            let _ = writeln!(out, "Project Update: {}", header.project_label);
            let _ = writeln!(out, "Date: {date}");
            if !submitter.is_empty() {
                let _ = writeln!(out, "Submitted by: {submitter}");
            }
            for (title, text) in sections {
                out.push('\n');
                if let Some(title) = title {
                    let _ = writeln!(out, "{title}:");
                }
                let _ = writeln!(out, "{text}");
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::StructuredFields;

    fn header() -> ExportHeader<'static> {
        ExportHeader {
            project_label: "7: Waiting lists (Alex)",
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        }
    }

    fn form() -> FormState {
        FormState {
            project_code: Some(7),
            submitter: "Sam".to_string(),
            quick_update: "Cleaned the data".to_string(),
            structured: StructuredFields {
                progress: "Model built".to_string(),
                next_steps: "Validate outputs".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_markdown_structured() {
        let text = render(&form(), FormMode::Structured, ExportFormat::Markdown, &header());

        assert_eq!(
            text,
            "## Project Update: 7: Waiting lists (Alex)\n\
             **Date:** 16/10/2026\n\
             **Submitted by:** Sam\n\
             \n\
             ### Progress\n\
             Model built\n\
             \n\
             ### Next Steps\n\
             Validate outputs"
        );
    }

    #[test]
    fn test_plain_text_quick() {
        let text = render(&form(), FormMode::Quick, ExportFormat::PlainText, &header());

        assert_eq!(
            text,
            "Project Update: 7: Waiting lists (Alex)\nDate: 16/10/2026\nSubmitted by: Sam\n\nCleaned the data"
        );
    }

    #[test]
    fn test_empty_fields_omitted() {
        let form = FormState {
            submitter: String::new(),
            quick_update: "  ".to_string(),
            ..form()
        };
        let text = render(&form, FormMode::Quick, ExportFormat::PlainText, &header());

        assert_eq!(text, "Project Update: 7: Waiting lists (Alex)\nDate: 16/10/2026");
    }
}
