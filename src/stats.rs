use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// 单个模式的运行统计
///
/// 计数器只增不减，限时模式下由生成循环和轮询循环并发递增。
#[derive(Debug)]
pub struct ModeStats {
    started_at: DateTime<Utc>,
    generated: AtomicU64,
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    retried: AtomicU64,
}

impl ModeStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            generated: AtomicU64::new(0),
            submitted: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            retried: AtomicU64::new(0),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retried(&self) {
        self.retried.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_retried(&self, count: u64) {
        self.retried.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            retried: self.retried.load(Ordering::Relaxed),
        }
    }
}

impl Default for ModeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// 统计计数的只读快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub generated: u64,
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    pub retried: u64,
}

/// 打印固定数量模式的最终统计
pub fn print_fixed_summary(
    total_tasks: u32,
    snapshot: &StatsSnapshot,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
) {
    let duration = (ended_at - started_at).num_milliseconds() as f64 / 1000.0;

    println!("\n{}", "=".repeat(50));
    println!("固定数量模式 测试结果统计");
    println!("{}", "=".repeat(50));
    println!("总任务数: {total_tasks}");
    println!("成功提交: {}", snapshot.submitted);
    println!("完成任务: {}", snapshot.completed);
    println!("失败任务: {}", snapshot.failed);
    println!("重试次数: {}", snapshot.retried);
    println!("运行时长: {duration:.2}秒");
    if total_tasks > 0 {
        let success_rate = snapshot.completed as f64 / total_tasks as f64 * 100.0;
        println!("成功率: {success_rate:.2}%");
    }
    if snapshot.completed > 0 {
        let avg = duration / snapshot.completed as f64;
        println!("平均完成时间: {avg:.2}秒/任务");
    }
    println!("{}", "=".repeat(50));
}

/// 打印限时模式的最终统计
pub fn print_time_summary(
    snapshot: &StatsSnapshot,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
) {
    let duration = (ended_at - started_at).num_milliseconds() as f64 / 1000.0;

    println!("\n{}", "=".repeat(50));
    println!("限时模式 测试结果统计");
    println!("{}", "=".repeat(50));
    println!("生成任务数: {}", snapshot.generated);
    println!("完成任务: {}", snapshot.completed);
    println!("失败任务: {}", snapshot.failed);
    println!("运行时长: {duration:.2}秒");
    if snapshot.generated > 0 {
        let completion_rate = snapshot.completed as f64 / snapshot.generated as f64 * 100.0;
        println!("完成率: {completion_rate:.2}%");
    }
    if duration > 0.0 {
        println!(
            "任务生成速率: {:.2}任务/秒",
            snapshot.generated as f64 / duration
        );
        println!(
            "任务完成速率: {:.2}任务/秒",
            snapshot.completed as f64 / duration
        );
    }
    println!("{}", "=".repeat(50));
}
