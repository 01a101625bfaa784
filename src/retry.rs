use std::time::Duration;

use tracing::warn;

use crate::client::PrintService;
use crate::errors::Result;
use crate::models::TaskData;

/// 提交重试策略
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（不含首次尝试）
    pub max_attempts: u32,
    /// 重试间隔
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

/// 一次带重试的提交结果
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub job_id: String,
    /// 实际使用的重试次数（0表示首次尝试即成功）
    pub attempts: u32,
}

/// 按策略提交任务：失败后间隔固定时间重试，超出次数上限后返回最后一次的错误
pub async fn submit_with_retry(
    client: &dyn PrintService,
    task: &TaskData,
    policy: &RetryPolicy,
) -> Result<SubmitOutcome> {
    let mut attempt = 0u32;
    loop {
        match client.submit_print_task(task, attempt).await {
            Ok(job_id) => {
                return Ok(SubmitOutcome {
                    job_id,
                    attempts: attempt,
                });
            }
            Err(e) => {
                attempt += 1;
                if attempt > policy.max_attempts {
                    return Err(e);
                }
                warn!(
                    "任务提交失败，{}ms后重试 (第{}/{}次重试): {}",
                    policy.interval.as_millis(),
                    attempt,
                    policy.max_attempts,
                    e
                );
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPrintService;
    use crate::errors::TesterError;

    fn test_task() -> TaskData {
        TaskData {
            priority: 1,
            team_name: "A队".to_string(),
            file_content: "内容".to_string(),
            color: true,
            problem_name: "问题".to_string(),
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let mut client = MockPrintService::new();
        client
            .expect_submit_print_task()
            .times(1)
            .returning(|_, _| Ok("job-1".to_string()));

        let outcome = submit_with_retry(&client, &test_task(), &fast_policy(3))
            .await
            .expect("首次提交应该成功");
        assert_eq!(outcome.job_id, "job-1");
        assert_eq!(outcome.attempts, 0);
    }

    #[tokio::test]
    async fn test_retry_then_succeed() {
        let mut client = MockPrintService::new();
        client
            .expect_submit_print_task()
            .times(2)
            .returning(|_, retry_count| {
                if retry_count == 0 {
                    Err(TesterError::Submission("服务不可用".to_string()))
                } else {
                    Ok("job-2".to_string())
                }
            });

        let outcome = submit_with_retry(&client, &test_task(), &fast_policy(3))
            .await
            .expect("重试后应该成功");
        assert_eq!(outcome.job_id, "job-2");
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_attempts_bounded_by_policy() {
        let mut client = MockPrintService::new();
        // 最多尝试 max_attempts + 1 次
        client
            .expect_submit_print_task()
            .times(3)
            .returning(|_, _| Err(TesterError::Submission("服务不可用".to_string())));

        let result = submit_with_retry(&client, &test_task(), &fast_policy(2)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_zero_max_attempts_means_single_try() {
        let mut client = MockPrintService::new();
        client
            .expect_submit_print_task()
            .times(1)
            .returning(|_, _| Err(TesterError::Submission("服务不可用".to_string())));

        let result = submit_with_retry(&client, &test_task(), &fast_policy(0)).await;
        assert!(result.is_err());
    }
}
