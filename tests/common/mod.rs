#![allow(dead_code)]

//! 测试用的嵌入式模拟打印服务

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{extract::State, routing::post, Json, Router};
use tokio::time::Instant;

use print_tester::models::{ApiResponse, JobInfoData, JobInfoQuery, SubmitData, TaskData};

/// 状态查询的应答策略
#[derive(Debug, Clone, Copy)]
pub enum StatusBehavior {
    AlwaysCompleted,
    AlwaysSubmitFailed,
    AlwaysWaiting,
}

/// 模拟服务行为配置
#[derive(Debug, Clone, Copy)]
pub struct MockServiceConfig {
    pub status_behavior: StatusBehavior,
    /// 前N次提交请求返回失败
    pub fail_first_submits: usize,
    /// 最多接受的提交次数，超出后拒绝（0表示不限制）
    pub max_accepted_submits: usize,
}

impl Default for MockServiceConfig {
    fn default() -> Self {
        Self {
            status_behavior: StatusBehavior::AlwaysCompleted,
            fail_first_submits: 0,
            max_accepted_submits: 0,
        }
    }
}

pub struct MockState {
    config: MockServiceConfig,
    submit_calls: AtomicUsize,
    accepted_submits: AtomicUsize,
    status_queries: AtomicUsize,
    submitted_tasks: Mutex<Vec<TaskData>>,
    submit_times: Mutex<Vec<Instant>>,
}

/// 模拟打印服务，绑定到随机端口
pub struct MockPrintServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockPrintServer {
    pub async fn start(config: MockServiceConfig) -> Self {
        let state = Arc::new(MockState {
            config,
            submit_calls: AtomicUsize::new(0),
            accepted_submits: AtomicUsize::new(0),
            status_queries: AtomicUsize::new(0),
            submitted_tasks: Mutex::new(Vec::new()),
            submit_times: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/print", post(print_handler))
            .route("/get_job_info", post(job_info_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("绑定模拟服务端口失败");
        let addr = listener.local_addr().expect("获取模拟服务地址失败");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("模拟服务运行失败");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// 收到的提交请求总数（含被拒绝的）
    pub fn submit_calls(&self) -> usize {
        self.state.submit_calls.load(Ordering::SeqCst)
    }

    /// 接受的提交次数
    pub fn accepted_submits(&self) -> usize {
        self.state.accepted_submits.load(Ordering::SeqCst)
    }

    /// 状态查询次数
    pub fn status_queries(&self) -> usize {
        self.state.status_queries.load(Ordering::SeqCst)
    }

    pub fn submitted_tasks(&self) -> Vec<TaskData> {
        self.state.submitted_tasks.lock().unwrap().clone()
    }

    pub fn submit_times(&self) -> Vec<Instant> {
        self.state.submit_times.lock().unwrap().clone()
    }
}

async fn print_handler(
    State(state): State<Arc<MockState>>,
    Json(task): Json<TaskData>,
) -> Json<ApiResponse<SubmitData>> {
    let call_index = state.submit_calls.fetch_add(1, Ordering::SeqCst);
    state.submitted_tasks.lock().unwrap().push(task);
    state.submit_times.lock().unwrap().push(Instant::now());

    if call_index < state.config.fail_first_submits {
        return Json(ApiResponse {
            status: "error".to_string(),
            message: Some("打印队列暂时不可用".to_string()),
            data: None,
        });
    }

    if state.config.max_accepted_submits > 0
        && state.accepted_submits.load(Ordering::SeqCst) >= state.config.max_accepted_submits
    {
        return Json(ApiResponse {
            status: "error".to_string(),
            message: Some("打印队列已满".to_string()),
            data: None,
        });
    }

    state.accepted_submits.fetch_add(1, Ordering::SeqCst);
    let job_id = format!("job-{}", uuid::Uuid::new_v4());
    Json(ApiResponse {
        status: "success".to_string(),
        message: None,
        data: Some(SubmitData { job_id }),
    })
}

async fn job_info_handler(
    State(state): State<Arc<MockState>>,
    Json(_query): Json<JobInfoQuery>,
) -> Json<ApiResponse<JobInfoData>> {
    state.status_queries.fetch_add(1, Ordering::SeqCst);

    let status = match state.config.status_behavior {
        StatusBehavior::AlwaysCompleted => "Completed",
        StatusBehavior::AlwaysSubmitFailed => "SubmitFailed",
        StatusBehavior::AlwaysWaiting => "Waiting",
    };

    Json(ApiResponse {
        status: "success".to_string(),
        message: None,
        data: Some(JobInfoData {
            status: status.to_string(),
        }),
    })
}
