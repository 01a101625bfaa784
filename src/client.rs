use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::config::ServerConfig;
use crate::errors::{Result, TesterError};
use crate::models::{ApiResponse, JobInfoData, JobInfoQuery, JobStatus, SubmitData, TaskData};

/// 打印服务客户端接口
///
/// 提交和状态查询的失败都以错误值返回，不会向上层抛出异常。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrintService: Send + Sync {
    /// 提交打印任务，成功时返回服务端分配的job_id
    async fn submit_print_task(&self, task: &TaskData, retry_count: u32) -> Result<String>;

    /// 查询任务当前状态
    async fn get_job_status(&self, job_id: &str) -> Result<JobStatus>;
}

/// 基于HTTP的打印服务客户端
pub struct HttpPrintClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpPrintClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| TesterError::Internal(format!("创建HTTP客户端失败: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl PrintService for HttpPrintClient {
    async fn submit_print_task(&self, task: &TaskData, retry_count: u32) -> Result<String> {
        let url = format!("{}/print", self.base_url);

        let response = match self.http_client.post(&url).json(task).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("任务提交失败 (重试次数: {}): {}", retry_count, e);
                return Err(TesterError::Submission(format!("请求打印服务失败: {e}")));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("任务提交失败 (重试次数: {}): HTTP {}", retry_count, status);
            return Err(TesterError::Submission(format!("HTTP {status} - {body}")));
        }

        let body: ApiResponse<SubmitData> = response
            .json()
            .await
            .map_err(|e| TesterError::Submission(format!("解析提交响应失败: {e}")))?;

        if !body.is_success() {
            return Err(TesterError::Submission(format!(
                "提交失败: {}",
                body.message.unwrap_or_else(|| "未知原因".to_string())
            )));
        }

        match body.data {
            Some(data) => Ok(data.job_id),
            None => Err(TesterError::Submission(
                "提交响应缺少job_id".to_string(),
            )),
        }
    }

    async fn get_job_status(&self, job_id: &str) -> Result<JobStatus> {
        let url = format!("{}/get_job_info", self.base_url);
        let query = JobInfoQuery {
            id: job_id.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&query)
            .send()
            .await
            .map_err(|e| TesterError::StatusQuery(format!("请求打印服务失败: {e}")))?;

        if !response.status().is_success() {
            return Err(TesterError::StatusQuery(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<JobInfoData> = response
            .json()
            .await
            .map_err(|e| TesterError::StatusQuery(format!("解析状态响应失败: {e}")))?;

        if !body.is_success() {
            return Err(TesterError::StatusQuery(format!(
                "查询失败: {}",
                body.message.unwrap_or_else(|| "未知原因".to_string())
            )));
        }

        match body.data {
            Some(data) => Ok(JobStatus::from(data.status.as_str())),
            None => Err(TesterError::StatusQuery(
                "状态响应缺少任务状态".to_string(),
            )),
        }
    }
}
