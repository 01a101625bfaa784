use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TesterError};

/// 打印服务连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
}

/// 固定数量模式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedModeConfig {
    /// 总任务数量
    pub total_tasks: u32,
    /// 提交失败的最大重试次数（不含首次尝试）
    pub max_retry_attempts: u32,
    /// 重试间隔（毫秒）
    pub retry_interval_ms: u64,
    /// 状态轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 等待任务完成的最长时间（秒），0表示不限制
    pub max_wait_seconds: u64,
}

/// 限时模式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBasedModeConfig {
    /// 运行时长（秒）
    pub duration_seconds: u64,
    /// 最小任务生成间隔（毫秒）
    pub min_interval_ms: u64,
    /// 最大任务生成间隔（毫秒）
    pub max_interval_ms: u64,
    /// 状态轮询间隔（毫秒）
    pub poll_interval_ms: u64,
}

/// 任务字段取值配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub priorities: Vec<u32>,
    pub team_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fixed_mode: FixedModeConfig,
    pub time_based_mode: TimeBasedModeConfig,
    pub task: TaskConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8080".to_string(),
                request_timeout_seconds: 30,
            },
            fixed_mode: FixedModeConfig {
                total_tasks: 60,
                max_retry_attempts: 3,
                retry_interval_ms: 2000,
                poll_interval_ms: 1000,
                max_wait_seconds: 300,
            },
            time_based_mode: TimeBasedModeConfig {
                duration_seconds: 60,
                min_interval_ms: 500,
                max_interval_ms: 3000,
                poll_interval_ms: 1000,
            },
            task: TaskConfig {
                priorities: vec![1, 2, 3],
                team_names: vec![
                    "A队".to_string(),
                    "B队".to_string(),
                    "C队".to_string(),
                    "D队".to_string(),
                    "E队".to_string(),
                ],
            },
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(TesterError::Configuration(format!("配置文件不存在: {path}")));
            }
        } else {
            let default_paths = ["config/print-tester.toml", "print-tester.toml"];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("server.base_url", "http://localhost:8080")?
                    .set_default("server.request_timeout_seconds", 30)?
                    .set_default("fixed_mode.total_tasks", 60)?
                    .set_default("fixed_mode.max_retry_attempts", 3)?
                    .set_default("fixed_mode.retry_interval_ms", 2000)?
                    .set_default("fixed_mode.poll_interval_ms", 1000)?
                    .set_default("fixed_mode.max_wait_seconds", 300)?
                    .set_default("time_based_mode.duration_seconds", 60)?
                    .set_default("time_based_mode.min_interval_ms", 500)?
                    .set_default("time_based_mode.max_interval_ms", 3000)?
                    .set_default("time_based_mode.poll_interval_ms", 1000)?
                    .set_default("task.priorities", vec![1i64, 2, 3])?
                    .set_default("task.team_names", vec!["A队", "B队", "C队", "D队", "E队"])?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PRINT_TESTER")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.is_empty() {
            return Err(TesterError::Configuration(
                "server.base_url 不能为空".to_string(),
            ));
        }
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://")
        {
            return Err(TesterError::Configuration(format!(
                "server.base_url 必须以 http:// 或 https:// 开头: {}",
                self.server.base_url
            )));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(TesterError::Configuration(
                "server.request_timeout_seconds 必须大于0".to_string(),
            ));
        }

        if self.fixed_mode.total_tasks == 0 {
            return Err(TesterError::Configuration(
                "fixed_mode.total_tasks 必须大于0".to_string(),
            ));
        }
        if self.fixed_mode.poll_interval_ms == 0 {
            return Err(TesterError::Configuration(
                "fixed_mode.poll_interval_ms 必须大于0".to_string(),
            ));
        }

        if self.time_based_mode.duration_seconds == 0 {
            return Err(TesterError::Configuration(
                "time_based_mode.duration_seconds 必须大于0".to_string(),
            ));
        }
        if self.time_based_mode.min_interval_ms > self.time_based_mode.max_interval_ms {
            return Err(TesterError::Configuration(format!(
                "time_based_mode.min_interval_ms ({}) 不能大于 max_interval_ms ({})",
                self.time_based_mode.min_interval_ms, self.time_based_mode.max_interval_ms
            )));
        }
        if self.time_based_mode.poll_interval_ms == 0 {
            return Err(TesterError::Configuration(
                "time_based_mode.poll_interval_ms 必须大于0".to_string(),
            ));
        }

        if self.task.priorities.is_empty() {
            return Err(TesterError::Configuration(
                "task.priorities 不能为空".to_string(),
            ));
        }
        if self.task.team_names.is_empty() {
            return Err(TesterError::Configuration(
                "task.team_names 不能为空".to_string(),
            ));
        }

        Ok(())
    }
}
