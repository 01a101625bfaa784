use serde::{Deserialize, Serialize};

/// 打印服务统一响应格式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// `/print` 成功响应携带的数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitData {
    pub job_id: String,
}

/// `/get_job_info` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInfoQuery {
    pub id: String,
}

/// `/get_job_info` 成功响应携带的数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInfoData {
    pub status: String,
}
