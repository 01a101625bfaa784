//! print-tester
//!
//! 打印任务负载测试工具：向外部打印服务提交合成任务，
//! 支持固定数量和限时两种压测模式，轮询任务状态并统计结果。

pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod generator;
pub mod models;
pub mod modes;
pub mod poller;
pub mod registry;
pub mod retry;
pub mod shutdown;
pub mod stats;

pub use errors::{Result, TesterError};
