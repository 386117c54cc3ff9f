//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::routes::form::__path_clear_form;
use crate::routes::form::__path_export_form;
use crate::routes::form::__path_refresh_form;
use crate::routes::form::__path_submit_quick;
use crate::routes::form::__path_submit_structured;
use crate::routes::form::{clear_form, export_form, refresh_form, submit_quick, submit_structured};
use crate::routes::projects::__path_get_last_update;
use crate::routes::projects::__path_list_projects;
use crate::routes::projects::{get_last_update, list_projects};
use crate::AppState;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use database::{LogEntryRepositoryTrait, ProjectRegistryTrait};
use serde_json::{json, Value};
use shared_lib::PAGE_TITLE;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod form;
pub mod projects;

/// 单页表单，所有交互都通过 `/api/v1` 接口完成
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// 导出当前App的所有API路由
///
/// ## 参数定义
/// - state: 共享数据，参考 [`AppState`] 定义。
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，在同一个宏里面不能同时定义多个相同类型的http接口，
/// 所以这里每个POST接口单独注册。
fn routers<LR, PR>(state: AppState<LR, PR>) -> OpenApiRouter
where
    LR: LogEntryRepositoryTrait,
    PR: ProjectRegistryTrait,
{
    OpenApiRouter::new()
        .routes(routes!(list_projects))
        .routes(routes!(get_last_update))
        .routes(routes!(submit_quick))
        .routes(routes!(submit_structured))
        .routes(routes!(refresh_form))
        .routes(routes!(clear_form))
        .routes(routes!(export_form))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档，通过 `/docs` 访问
/// - 生成API路由，统一挂在 `/api/v1` 下
/// - 首页 `/` 返回表单页面，`/health` 用于存活检查
pub fn create_app_router<LR, PR>(shared_state: AppState<LR, PR>) -> Router
where
    LR: LogEntryRepositoryTrait,
    PR: ProjectRegistryTrait,
{
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        info(title = "HSMA Project Progress Reporter"),
        tags(
            (name = "projects", description = "项目注册表与最近更新"),
            (name = "form", description = "进度表单操作：提交、刷新、清空、导出")
        ),
    )]
    struct ApiDoc;

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    router
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(Scalar::with_url("/docs", api))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": PAGE_TITLE
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FlakyStore;
    use crate::services::{FormController, RetryPolicy, SubmissionPolicies};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use database::{DatabaseError, DatabaseResult, Project};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StaticRegistry {
        available: bool,
    }

    #[async_trait::async_trait]
    impl ProjectRegistryTrait for StaticRegistry {
        async fn fetch_projects(&self) -> DatabaseResult<Vec<Project>> {
            if !self.available {
                return Err(DatabaseError::registry_format("sheet unavailable"));
            }
            Ok(vec![
                Project::new(3, "Discharge delays", "Jo"),
                Project::new(7, "Waiting lists", "Alex"),
            ])
        }
    }

    fn app(store: Arc<FlakyStore>, available: bool) -> Router {
        let policies = SubmissionPolicies {
            quick: RetryPolicy::immediate(2),
            structured: RetryPolicy::immediate(2),
        };
        let controller = FormController::new(
            store,
            Arc::new(StaticRegistry { available }),
            policies,
            "the HSMA team",
        );
        create_app_router(AppState {
            controller: Arc::new(controller),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_projects() {
        let response = app(Arc::new(FlakyStore::reliable()), true)
            .oneshot(Request::get("/api/v1/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"][1]["label"], "7: Waiting lists (Alex)");
    }

    #[tokio::test]
    async fn test_registry_failure_is_bad_gateway() {
        let response = app(Arc::new(FlakyStore::reliable()), false)
            .oneshot(Request::get("/api/v1/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_last_update_without_entries() {
        let response = app(Arc::new(FlakyStore::reliable()), true)
            .oneshot(Request::get("/api/v1/projects/7/last-update").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["project_code"], 7);
        assert!(json["data"]["last_update"].is_null());
    }

    #[tokio::test]
    async fn test_submit_quick_round_trip() {
        let store = Arc::new(FlakyStore::reliable());
        let response = app(store.clone(), true)
            .oneshot(post(
                "/api/v1/form/submit-quick",
                json!({"project_code": 7, "submitter": "Sam", "quick_update": "Built the model"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["feedback"][0]["kind"], "success");
        assert_eq!(json["commands"][0]["type"], "celebrate");
        assert_eq!(json["last_update"]["submitter"], "Sam");
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_warning_is_not_http_error() {
        let store = Arc::new(FlakyStore::reliable());
        let response = app(store.clone(), true)
            .oneshot(post("/api/v1/form/submit-structured", json!({"submitter": "Sam"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["feedback"][0]["kind"], "warning");
        assert_eq!(store.attempts(), 0);
    }

    #[tokio::test]
    async fn test_clear_form() {
        let response = app(Arc::new(FlakyStore::reliable()), true)
            .oneshot(post(
                "/api/v1/form/clear",
                json!({
                    "project_code": 7,
                    "submitter": "Sam",
                    "quick_update": "draft",
                    "structured": {"progress": "draft", "other": "draft"}
                }),
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["form"]["project_code"], 7);
        assert_eq!(json["form"]["quick_update"], "");
        assert_eq!(json["form"]["structured"]["progress"], "");
        assert_eq!(json["form"]["structured"]["other"], "");
    }

    #[tokio::test]
    async fn test_export_markdown() {
        let response = app(Arc::new(FlakyStore::reliable()), true)
            .oneshot(post(
                "/api/v1/form/export",
                json!({
                    "form": {"project_code": 3, "submitter": "Sam", "structured": {"progress": "Done"}},
                    "mode": "structured",
                    "format": "markdown"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["commands"][0]["type"], "copy_to_clipboard");
        let text = json["commands"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("## Project Update: 3: Discharge delays (Jo)"));
        assert!(text.contains("### Progress\nDone"));
    }

    #[tokio::test]
    async fn test_export_with_registry_down() {
        let response = app(Arc::new(FlakyStore::reliable()), false)
            .oneshot(post(
                "/api/v1/form/export",
                json!({
                    "form": {"project_code": 7, "submitter": "Sam", "quick_update": "Draft"},
                    "mode": "quick",
                    "format": "plain_text",
                    "project_label": "7: Waiting lists (Alex)"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let text = json["commands"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Project Update: 7: Waiting lists (Alex)"));
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let router = app(Arc::new(FlakyStore::reliable()), true);

        let page = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::OK);
        let html = page.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8_lossy(&html);
        // 注册表表格和下拉框共用同一次 /projects 请求
        assert!(html.contains(r#"<table id="registry">"#));
        assert!(html.contains("<th>Project Code</th><th>Project Title</th><th>Lead</th>"));
        assert!(html.contains("project_label: selectedLabel()"));

        let health = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(health).await["status"], "healthy");
    }
}
