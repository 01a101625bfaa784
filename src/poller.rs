use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::client::PrintService;
use crate::models::{JobRecord, JobStatus, RunMode};
use crate::registry::JobRegistry;
use crate::stats::ModeStats;

/// 任务状态轮询器
///
/// 每个轮询周期对注册表做一次全量检查，根据服务端返回的状态
/// 驱动任务的状态迁移。固定数量模式下观察到 SubmitFailed 会
/// 立即重新提交一次；限时模式下直接计为失败。
pub struct StatusPoller {
    client: Arc<dyn PrintService>,
    registry: Arc<Mutex<JobRegistry>>,
    stats: Arc<ModeStats>,
    mode: RunMode,
    poll_interval: Duration,
}

impl StatusPoller {
    pub fn new(
        client: Arc<dyn PrintService>,
        registry: Arc<Mutex<JobRegistry>>,
        stats: Arc<ModeStats>,
        mode: RunMode,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            registry,
            stats,
            mode,
            poll_interval,
        }
    }

    /// 轮询直到注册表排空或到达截止时间
    ///
    /// 固定数量模式：注册表为空即结束；截止时间用于限制总等待时长。
    /// 限时模式：注册表为空时继续等待新任务，直到截止时间；
    /// 截止时仍在途的任务被放弃，不计入完成或失败。
    pub async fn run(&self, deadline: Option<Instant>) {
        let mut cycle = 0u64;

        loop {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    let remaining = self.registry.lock().await.len();
                    if remaining > 0 {
                        warn!("轮询截止时间已到，放弃剩余 {} 个在途任务", remaining);
                    }
                    break;
                }
            }

            let job_ids = self.registry.lock().await.job_ids();
            if job_ids.is_empty() {
                match self.mode {
                    RunMode::Fixed => {
                        debug!("注册表已排空，停止轮询");
                        break;
                    }
                    RunMode::TimeBased => {
                        // 生成循环仍可能提交新任务，空转等待下一周期
                        tokio::time::sleep(self.poll_interval).await;
                        continue;
                    }
                }
            }

            cycle += 1;
            info!("第{}次状态检查，共 {} 个任务", cycle, job_ids.len());

            let mut summaries = Vec::with_capacity(job_ids.len());
            for job_id in job_ids {
                let record = self.registry.lock().await.get(&job_id).cloned();
                let Some(record) = record else {
                    continue;
                };

                match self.client.get_job_status(&job_id).await {
                    Ok(status) => {
                        summaries.push(format!("{job_id}({status})"));
                        self.apply_transition(record, status).await;
                    }
                    Err(e) => {
                        warn!("查询任务状态失败 (job_id: {}): {}", job_id, e);
                        summaries.push(format!("{job_id}(查询失败)"));
                    }
                }
            }

            debug!("状态摘要: [{}]", summaries.join(", "));
            info!(
                "进度: 已完成 {}，剩余 {} 个任务运行中",
                self.stats.snapshot().completed,
                self.registry.lock().await.len()
            );

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn apply_transition(&self, record: JobRecord, status: JobStatus) {
        match status {
            JobStatus::Completed => {
                self.registry.lock().await.remove(&record.job_id);
                self.stats.record_completed();
                info!("任务完成 (job_id: {})", record.job_id);
            }
            JobStatus::SubmitFailed => match self.mode {
                RunMode::Fixed => {
                    self.registry.lock().await.remove(&record.job_id);
                    warn!("任务被服务端标记为提交失败，重新提交 (job_id: {})", record.job_id);

                    let retry_count = record.retry_count + 1;
                    self.stats.record_retried();
                    match self
                        .client
                        .submit_print_task(&record.task_data, retry_count)
                        .await
                    {
                        Ok(new_job_id) => {
                            info!(
                                "重新提交成功 (原job_id: {}, 新job_id: {})",
                                record.job_id, new_job_id
                            );
                            self.registry
                                .lock()
                                .await
                                .insert(record.resubmitted(new_job_id, retry_count));
                        }
                        Err(e) => {
                            self.stats.record_failed();
                            error!("重新提交失败 (job_id: {}): {}", record.job_id, e);
                        }
                    }
                }
                RunMode::TimeBased => {
                    self.registry.lock().await.remove(&record.job_id);
                    self.stats.record_failed();
                    warn!("任务失败 (job_id: {})", record.job_id);
                }
            },
            JobStatus::Waiting => {}
            JobStatus::Other(status) => {
                debug!("任务状态: {} (job_id: {})", status, record.job_id);
            }
        }
    }
}
