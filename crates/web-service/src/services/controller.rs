//! 表单控制器
//!
//! 所有表单操作都是 `FormState -> FormOutcome` 的函数，不依赖任何页面渲染环境。
//! 路由层只负责把HTTP请求转换为这里的调用。

use crate::models::entry::EntryType;
use crate::models::feedback::{FeedbackKind, FeedbackMessage, FormOutcome, LastUpdate, SideEffect};
use crate::models::form::{ExportFormat, FormMode, FormState, ValidationError};
use crate::services::export::{self, ExportHeader};
use crate::services::history::UpdateHistoryReader;
use crate::services::retry::{RetryPolicy, SubmissionPolicies};
use crate::services::writer::{CandidateEntry, EmptyEntries, EntryOutcome, SubmissionHeader, SubmissionWriter};
use chrono::{Local, Utc};
use database::{DatabaseResult, LogEntryRepositoryTrait, ProjectRegistryTrait};
use shared_lib::NO_PROJECT_SELECTED;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct FormController<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait> {
    writer: SubmissionWriter<LR>,
    history: UpdateHistoryReader<LR>,
    registry: Arc<PR>,
    policies: SubmissionPolicies,
    escalation_contact: String,
}

impl<LR: LogEntryRepositoryTrait, PR: ProjectRegistryTrait> FormController<LR, PR> {
    pub fn new(
        repository: Arc<LR>,
        registry: Arc<PR>,
        policies: SubmissionPolicies,
        escalation_contact: impl Into<String>,
    ) -> Self {
        Self {
            writer: SubmissionWriter::new(repository.clone()),
            history: UpdateHistoryReader::new(repository),
            registry,
            policies,
            escalation_contact: escalation_contact.into(),
        }
    }

    /// 注册表中的项目列表
    pub async fn projects(&self) -> DatabaseResult<Vec<database::Project>> {
        self.registry.fetch_projects().await
    }

    /// 查询项目最近一次更新
    pub async fn last_update(&self, project_code: i64) -> DatabaseResult<Option<LastUpdate>> {
        self.history.fetch_last_update(project_code).await
    }

    /// 快速提交：一条 `Simple Log`
    #[instrument(skip_all, fields(project = ?form.project_code))]
    pub async fn submit_quick(&self, form: FormState) -> FormOutcome {
        let candidates = vec![CandidateEntry::new(EntryType::Simple, form.quick_update.as_str())];
        self.submit(form, FormMode::Quick, candidates, self.policies.quick, EmptyEntries::Write)
            .await
    }

    /// 结构化提交：每个有内容的分类一条日志，互相独立
    #[instrument(skip_all, fields(project = ?form.project_code))]
    pub async fn submit_structured(&self, form: FormState) -> FormOutcome {
        let candidates = form
            .structured
            .iter()
            .map(|(category, text)| CandidateEntry::new(EntryType::Structured(category), text))
            .collect();
        self.submit(
            form,
            FormMode::Structured,
            candidates,
            self.policies.structured,
            EmptyEntries::Skip,
        )
        .await
    }

    async fn submit(
        &self,
        form: FormState,
        mode: FormMode,
        candidates: Vec<CandidateEntry>,
        policy: RetryPolicy,
        empty: EmptyEntries,
    ) -> FormOutcome {
        let mut feedback = match form.validate_for(mode) {
            Err(err) => {
                debug!("表单校验未通过: {}", err);
                vec![validation_warning(err)]
            }
            Ok(valid) => {
                let header = SubmissionHeader {
                    created_at: Utc::now(),
                    project_code: valid.project_code,
                    submitter: valid.submitter,
                };
                let outcomes = self.writer.write_entries(&header, candidates, policy, empty).await;
                self.describe_outcomes(mode, &outcomes)
            }
        };

        let celebrate = feedback.iter().any(|m| m.kind == FeedbackKind::Success);

        let mut outcome = FormOutcome::new(form);
        if let Some(code) = outcome.form.project_code {
            match self.history.fetch_last_update(code).await {
                Ok(last) => outcome = outcome.with_last_update(last),
                Err(err) => {
                    error!("❌ 刷新最近更新失败: {}", err);
                    feedback.push(FeedbackMessage::warning(
                        "Your submission was processed, but the last update time could not be refreshed.",
                    ));
                }
            }
        }

        outcome.feedback = feedback;
        if celebrate {
            outcome.commands.push(SideEffect::Celebrate);
        }
        outcome
    }

    /// 把写入结果转换为反馈信息
    ///
    /// 成功的分类合并成一条成功信息，每个失败的条目单独一条警告
    fn describe_outcomes(&self, mode: FormMode, outcomes: &[EntryOutcome]) -> Vec<FeedbackMessage> {
        let mut success: Option<FeedbackMessage> = None;
        let mut warnings = Vec::new();

        for outcome in outcomes {
            match outcome {
                EntryOutcome::Written { entry_type, .. } => match mode {
                    FormMode::Quick => {
                        success = Some(FeedbackMessage::success("Thanks! Your update has been logged."));
                    }
                    FormMode::Structured => match success.as_mut() {
                        Some(message) => {
                            message.text.push_str(", ");
                            message.text.push_str(entry_type.short_label());
                        }
                        None => {
                            success = Some(FeedbackMessage::success(format!(
                                "Thanks! Your update has been logged for: {}",
                                entry_type.short_label()
                            )));
                        }
                    },
                },
                EntryOutcome::Failed { entry_type, attempts, .. } => {
                    let what = match mode {
                        FormMode::Quick => "Your update".to_string(),
                        FormMode::Structured => format!("Your '{}' update", entry_type.short_label()),
                    };
                    warnings.push(FeedbackMessage::warning(format!(
                        "{what} could not be saved after {attempts} attempts. \
                         Please contact {} so it can be recorded.",
                        self.escalation_contact
                    )));
                }
                EntryOutcome::Skipped { .. } => {}
            }
        }

        if warnings.is_empty() && success.is_some() {
            info!("🎉 提交完成");
        }
        success.into_iter().chain(warnings).collect()
    }

    /// 手动刷新最近更新信息
    pub async fn refresh(&self, form: FormState) -> DatabaseResult<FormOutcome> {
        let last = match form.project_code {
            Some(code) => Some(self.history.fetch_last_update(code).await?),
            None => None,
        };
        let outcome = FormOutcome::new(form);
        Ok(match last {
            Some(last) => outcome.with_last_update(last),
            None => outcome,
        })
    }

    /// 清空所有文本框
    ///
    /// 保留项目和提交人，不影响已经写入的日志
    pub fn clear_fields(&self, form: FormState) -> FormOutcome {
        FormOutcome::new(form.cleared())
    }

    /// 导出到剪贴板
    ///
    /// 只做文本格式化，不写入任何数据。项目名称优先使用页面传入的 `project_label`，
    /// 没有传入时才查询注册表；注册表不可用时退化为项目编号，导出本身不会失败。
    pub async fn export(
        &self,
        form: FormState,
        mode: FormMode,
        format: ExportFormat,
        project_label: Option<String>,
    ) -> FormOutcome {
        let label = self.export_label(form.project_code, project_label).await;

        let header = ExportHeader {
            project_label: &label,
            date: Local::now().date_naive(),
        };
        let text = export::render(&form, mode, format, &header);
        let notice = match format {
            ExportFormat::Markdown => "Copied Markdown to clipboard!",
            ExportFormat::PlainText => "Copied text to clipboard!",
        };

        let mut outcome = FormOutcome::new(form);
        outcome.commands.push(SideEffect::CopyToClipboard { text });
        outcome.commands.push(SideEffect::Toast {
            text: notice.to_string(),
        });
        outcome
    }

    async fn export_label(&self, project_code: Option<i64>, supplied: Option<String>) -> String {
        let Some(code) = project_code else {
            return NO_PROJECT_SELECTED.to_string();
        };
        if let Some(label) = supplied.filter(|l| !l.trim().is_empty()) {
            return label;
        }

        match self.registry.fetch_projects().await {
            Ok(projects) => projects
                .into_iter()
                .find(|p| p.code == code)
                .map(|p| p.label)
                .unwrap_or_else(|| code.to_string()),
            Err(err) => {
                warn!("⚠️ 注册表不可用，导出时使用项目编号 {}: {}", code, err);
                code.to_string()
            }
        }
    }
}

fn validation_warning(err: ValidationError) -> FeedbackMessage {
    FeedbackMessage::warning(err.to_string())
}
