use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::client::{HttpPrintClient, PrintService};
use crate::config::AppConfig;
use crate::errors::{Result, TesterError};
use crate::generator::TaskGenerator;
use crate::modes::{FixedModeRunner, TimeBasedModeRunner};

/// 两种模式之间的间隔
const MODE_PAUSE: Duration = Duration::from_secs(2);

/// 应用运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// 仅运行固定数量模式
    Fixed,
    /// 仅运行限时模式
    TimeBased,
    /// 先运行固定数量模式，再运行限时模式
    Both,
}

/// 解析命令行的模式参数
pub fn parse_app_mode(mode_str: &str) -> Result<AppMode> {
    match mode_str {
        "1" | "fixed" => Ok(AppMode::Fixed),
        "2" | "time" => Ok(AppMode::TimeBased),
        "both" => Ok(AppMode::Both),
        _ => Err(TesterError::Configuration(format!(
            "不支持的运行模式: {mode_str}"
        ))),
    }
}

/// 主应用程序
pub struct Application {
    config: AppConfig,
    client: Arc<dyn PrintService>,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client: Arc<dyn PrintService> = Arc::new(HttpPrintClient::new(&config.server)?);
        Ok(Self { config, client })
    }

    /// 运行选定的测试模式，收到关闭信号时中止
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>, mode: AppMode) -> Result<()> {
        info!("启动测试，模式: {:?}", mode);

        tokio::select! {
            _ = shutdown_rx.recv() => {
                warn!("收到关闭信号，中止测试");
                Ok(())
            }
            result = self.run_modes(mode) => result,
        }
    }

    async fn run_modes(&self, mode: AppMode) -> Result<()> {
        match mode {
            AppMode::Fixed => {
                self.run_fixed().await;
            }
            AppMode::TimeBased => {
                self.run_time_based().await;
            }
            AppMode::Both => {
                self.run_fixed().await;
                info!("等待 {} 秒后开始限时模式...", MODE_PAUSE.as_secs());
                tokio::time::sleep(MODE_PAUSE).await;
                self.run_time_based().await;
            }
        }

        info!("所有测试完成");
        Ok(())
    }

    async fn run_fixed(&self) {
        let runner = FixedModeRunner::new(
            self.config.fixed_mode.clone(),
            Arc::clone(&self.client),
            TaskGenerator::new(&self.config.task),
        );
        runner.run().await;
    }

    async fn run_time_based(&self) {
        let runner = TimeBasedModeRunner::new(
            self.config.time_based_mode.clone(),
            Arc::clone(&self.client),
            TaskGenerator::new(&self.config.task),
        );
        runner.run().await;
    }
}
