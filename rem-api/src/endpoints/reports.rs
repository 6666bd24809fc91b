use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{
    GenerateReportRequest, ReportDetail, ReportSummary, ReportTask, ReportType, TaskCreated,
};
use crate::transport::Transport;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportTypeList {
    #[serde(default)]
    pub types: Vec<ReportType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportList {
    #[serde(default)]
    pub reports: Vec<ReportSummary>,
}

pub async fn types<T: Transport>(client: &ApiClient<T>) -> Result<ReportTypeList, ApiError> {
    client.get("/reports/types", Query::new()).await
}

/// Public report library.
pub async fn list<T: Transport>(client: &ApiClient<T>) -> Result<ReportList, ApiError> {
    client.get("/reports/list", Query::new()).await
}

/// Reports generated by the current user.
pub async fn mine<T: Transport>(client: &ApiClient<T>) -> Result<ReportList, ApiError> {
    client.get("/reports/my", Query::new()).await
}

pub async fn detail<T: Transport>(
    client: &ApiClient<T>,
    report_id: i64,
) -> Result<ReportDetail, ApiError> {
    client.get(&format!("/reports/{report_id}"), Query::new()).await
}

/// Synchronous generation: blocks until the report exists.
pub async fn generate<T: Transport>(
    client: &ApiClient<T>,
    request: &GenerateReportRequest,
) -> Result<ReportDetail, ApiError> {
    client.post("/reports/generate", request).await
}

/// Async AI generation: returns a task id to poll via
/// [`crate::tasks::poll_report_task`].
pub async fn generate_ai_async<T: Transport>(
    client: &ApiClient<T>,
    request: &GenerateReportRequest,
) -> Result<TaskCreated, ApiError> {
    client.post("/reports/generate/ai/async", request).await
}

pub async fn task_status<T: Transport>(
    client: &ApiClient<T>,
    task_id: &str,
) -> Result<ReportTask, ApiError> {
    client
        .get(&format!("/reports/task/{task_id}"), Query::new())
        .await
}
