use chrono::Utc;

use crate::config::TaskConfig;
use crate::models::TaskData;

/// 随机任务数据生成器
///
/// priority/team_name/color 在配置的取值集合内均匀随机；
/// file_content/problem_name 通过序号和当前时间保证不重复。
#[derive(Debug, Clone)]
pub struct TaskGenerator {
    priorities: Vec<u32>,
    team_names: Vec<String>,
}

impl TaskGenerator {
    pub fn new(config: &TaskConfig) -> Self {
        Self {
            priorities: config.priorities.clone(),
            team_names: config.team_names.clone(),
        }
    }

    pub fn generate(&self, index: usize) -> TaskData {
        let timestamp = Utc::now().timestamp_millis();
        TaskData {
            priority: *pick(&self.priorities),
            team_name: pick(&self.team_names).clone(),
            file_content: format!("测试文件内容-{index}-{timestamp}"),
            color: rand::random::<bool>(),
            problem_name: format!("测试问题-{index}-{timestamp}"),
        }
    }
}

fn pick<T>(items: &[T]) -> &T {
    let i = (rand::random::<f64>() * items.len() as f64) as usize;
    &items[i.min(items.len() - 1)]
}
