use thiserror::Error;

/// 测试工具错误类型定义
#[derive(Debug, Error)]
pub enum TesterError {
    #[error("任务提交失败: {0}")]
    Submission(String),

    #[error("任务状态查询失败: {0}")]
    StatusQuery(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for TesterError {
    fn from(err: config::ConfigError) -> Self {
        TesterError::Configuration(err.to_string())
    }
}

impl From<toml::de::Error> for TesterError {
    fn from(err: toml::de::Error) -> Self {
        TesterError::Configuration(err.to_string())
    }
}

/// 统一的Result类型
pub type Result<T> = std::result::Result<T, TesterError>;
