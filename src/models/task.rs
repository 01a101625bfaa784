use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 打印任务请求数据，生成后不可变
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskData {
    pub priority: u32,
    pub team_name: String,
    pub file_content: String,
    pub color: bool,
    pub problem_name: String,
}

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "time")]
    TimeBased,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Fixed => write!(f, "fixed"),
            RunMode::TimeBased => write!(f, "time"),
        }
    }
}

/// 服务端返回的任务状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Waiting,
    Completed,
    SubmitFailed,
    Other(String),
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "Waiting" => JobStatus::Waiting,
            "Completed" => JobStatus::Completed,
            "SubmitFailed" => JobStatus::SubmitFailed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Waiting => write!(f, "Waiting"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::SubmitFailed => write!(f, "SubmitFailed"),
            JobStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// 在途任务记录，从提交成功到观察到终态为止
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: String,
    pub task_data: TaskData,
    pub submit_time: DateTime<Utc>,
    pub retry_count: u32,
    pub mode: RunMode,
}

impl JobRecord {
    pub fn new(job_id: String, task_data: TaskData, retry_count: u32, mode: RunMode) -> Self {
        Self {
            job_id,
            task_data,
            submit_time: Utc::now(),
            retry_count,
            mode,
        }
    }

    /// 重新提交后得到的新记录：沿用原始任务数据与提交时间，仅更新job_id和重试次数
    pub fn resubmitted(&self, job_id: String, retry_count: u32) -> Self {
        Self {
            job_id,
            task_data: self.task_data.clone(),
            submit_time: self.submit_time,
            retry_count,
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_from_str() {
        assert_eq!(JobStatus::from("Waiting"), JobStatus::Waiting);
        assert_eq!(JobStatus::from("Completed"), JobStatus::Completed);
        assert_eq!(JobStatus::from("SubmitFailed"), JobStatus::SubmitFailed);
        assert_eq!(
            JobStatus::from("Printing"),
            JobStatus::Other("Printing".to_string())
        );
    }

    #[test]
    fn test_resubmitted_keeps_task_data_and_submit_time() {
        let task = TaskData {
            priority: 1,
            team_name: "A队".to_string(),
            file_content: "内容".to_string(),
            color: true,
            problem_name: "问题".to_string(),
        };
        let record = JobRecord::new("job-1".to_string(), task.clone(), 0, RunMode::Fixed);
        let retried = record.resubmitted("job-2".to_string(), 1);

        assert_eq!(retried.job_id, "job-2");
        assert_eq!(retried.retry_count, 1);
        assert_eq!(retried.task_data, task);
        assert_eq!(retried.submit_time, record.submit_time);
        assert_eq!(retried.mode, RunMode::Fixed);
    }
}
