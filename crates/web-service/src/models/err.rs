use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DatabaseError;
use thiserror::Error;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
///
/// 表单校验失败不属于这里的错误：它们作为警告反馈返回，HTTP状态依然是200。
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据访问错误（日志表或注册表）
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RepositoryError(err) => match err {
                DatabaseError::SqlxError(sqlx::Error::RowNotFound) => {
                    (StatusCode::NOT_FOUND, format!("Record not found: {err}")).into_response()
                }
                DatabaseError::HttpError(_) | DatabaseError::RegistryFormatError(_) => {
                    (StatusCode::BAD_GATEWAY, format!("Project registry unavailable: {err}")).into_response()
                }
                DatabaseError::RegistryTimeout(_) => {
                    (StatusCode::GATEWAY_TIMEOUT, format!("Project registry timed out: {err}")).into_response()
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, format!("Repository error: {err}")).into_response(),
            },
        }
    }
}
