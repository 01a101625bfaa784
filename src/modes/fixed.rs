use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{error, info};

use crate::client::PrintService;
use crate::config::FixedModeConfig;
use crate::generator::TaskGenerator;
use crate::models::{JobRecord, RunMode};
use crate::poller::StatusPoller;
use crate::registry::JobRegistry;
use crate::retry::{submit_with_retry, RetryPolicy};
use crate::stats::{print_fixed_summary, ModeStats, StatsSnapshot};

/// 固定数量模式
///
/// 提交固定数量的任务，提交失败按策略重试；全部提交完成后
/// 轮询任务状态直到注册表排空或到达等待上限。
pub struct FixedModeRunner {
    config: FixedModeConfig,
    client: Arc<dyn PrintService>,
    generator: TaskGenerator,
}

impl FixedModeRunner {
    pub fn new(
        config: FixedModeConfig,
        client: Arc<dyn PrintService>,
        generator: TaskGenerator,
    ) -> Self {
        Self {
            config,
            client,
            generator,
        }
    }

    pub async fn run(&self) -> StatsSnapshot {
        info!(
            "开始固定数量模式: 目标任务数 {}，最大重试次数 {}",
            self.config.total_tasks, self.config.max_retry_attempts
        );

        let registry = Arc::new(Mutex::new(JobRegistry::new()));
        let stats = Arc::new(ModeStats::new());
        let policy = RetryPolicy::new(
            self.config.max_retry_attempts,
            Duration::from_millis(self.config.retry_interval_ms),
        );

        for i in 0..self.config.total_tasks {
            let task = self.generator.generate(i as usize);
            stats.record_generated();

            match submit_with_retry(self.client.as_ref(), &task, &policy).await {
                Ok(outcome) => {
                    stats.record_submitted();
                    stats.add_retried(outcome.attempts as u64);
                    info!("任务 {} 提交成功 (job_id: {})", i + 1, outcome.job_id);
                    registry.lock().await.insert(JobRecord::new(
                        outcome.job_id,
                        task,
                        outcome.attempts,
                        RunMode::Fixed,
                    ));
                }
                Err(e) => {
                    stats.add_retried(self.config.max_retry_attempts as u64);
                    stats.record_failed();
                    error!("任务 {} 最终提交失败: {}", i + 1, e);
                }
            }
        }

        info!("开始监控任务执行状态...");
        let deadline = (self.config.max_wait_seconds > 0)
            .then(|| Instant::now() + Duration::from_secs(self.config.max_wait_seconds));
        let poller = StatusPoller::new(
            Arc::clone(&self.client),
            Arc::clone(&registry),
            Arc::clone(&stats),
            RunMode::Fixed,
            Duration::from_millis(self.config.poll_interval_ms),
        );
        poller.run(deadline).await;

        let snapshot = stats.snapshot();
        print_fixed_summary(
            self.config.total_tasks,
            &snapshot,
            stats.started_at(),
            Utc::now(),
        );
        snapshot
    }
}
