use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::client::PrintService;
use crate::config::TimeBasedModeConfig;
use crate::generator::TaskGenerator;
use crate::models::{JobRecord, RunMode};
use crate::poller::StatusPoller;
use crate::registry::JobRegistry;
use crate::stats::{print_time_summary, ModeStats, StatsSnapshot};

/// 限时模式
///
/// 在截止时间前以随机间隔持续生成并提交任务（提交失败不重试），
/// 状态轮询与任务生成并发运行，共享同一个注册表。
pub struct TimeBasedModeRunner {
    config: TimeBasedModeConfig,
    client: Arc<dyn PrintService>,
    generator: TaskGenerator,
}

impl TimeBasedModeRunner {
    pub fn new(
        config: TimeBasedModeConfig,
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
            "开始限时模式: 运行时长 {} 秒",
            self.config.duration_seconds
        );

        let registry = Arc::new(Mutex::new(JobRegistry::new()));
        let stats = Arc::new(ModeStats::new());
        let deadline = Instant::now() + Duration::from_secs(self.config.duration_seconds);

        let generator_loop = async {
            let mut index = 0usize;
            while Instant::now() < deadline {
                let task = self.generator.generate(index);
                index += 1;
                stats.record_generated();

                match self.client.submit_print_task(&task, 0).await {
                    Ok(job_id) => {
                        stats.record_submitted();
                        info!("任务 {} 提交成功 (job_id: {})", index, job_id);
                        registry.lock().await.insert(JobRecord::new(
                            job_id,
                            task,
                            0,
                            RunMode::TimeBased,
                        ));
                    }
                    Err(e) => {
                        stats.record_failed();
                        warn!("任务 {} 提交失败: {}", index, e);
                    }
                }

                tokio::time::sleep(self.random_interval()).await;
            }
            info!("到达截止时间，停止生成新任务");
        };

        let poller = StatusPoller::new(
            Arc::clone(&self.client),
            Arc::clone(&registry),
            Arc::clone(&stats),
            RunMode::TimeBased,
            Duration::from_millis(self.config.poll_interval_ms),
        );

        tokio::join!(generator_loop, poller.run(Some(deadline)));

        let snapshot = stats.snapshot();
        print_time_summary(&snapshot, stats.started_at(), Utc::now());
        snapshot
    }

    fn random_interval(&self) -> Duration {
        let span = self
            .config
            .max_interval_ms
            .saturating_sub(self.config.min_interval_ms);
        let wait_ms = self.config.min_interval_ms + (rand::random::<f64>() * span as f64) as u64;
        Duration::from_millis(wait_ms)
    }
}
