use std::collections::HashMap;

use crate::models::JobRecord;

/// 在途任务注册表
///
/// 以job_id为键的插入有序映射。注册表本身不加锁，
/// 并发共享时由持有方包装在 `Arc<tokio::sync::Mutex<_>>` 中。
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<String, JobRecord>,
    order: Vec<String>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入任务记录。同一job_id重复插入时覆盖记录，保持原有顺序位置。
    pub fn insert(&mut self, record: JobRecord) {
        if !self.jobs.contains_key(&record.job_id) {
            self.order.push(record.job_id.clone());
        }
        self.jobs.insert(record.job_id.clone(), record);
    }

    pub fn remove(&mut self, job_id: &str) -> Option<JobRecord> {
        let removed = self.jobs.remove(job_id);
        if removed.is_some() {
            self.order.retain(|id| id != job_id);
        }
        removed
    }

    pub fn get(&self, job_id: &str) -> Option<&JobRecord> {
        self.jobs.get(job_id)
    }

    /// 按插入顺序返回当前所有job_id
    pub fn job_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunMode, TaskData};

    fn test_record(job_id: &str) -> JobRecord {
        JobRecord::new(
            job_id.to_string(),
            TaskData {
                priority: 1,
                team_name: "A队".to_string(),
                file_content: "内容".to_string(),
                color: false,
                problem_name: "问题".to_string(),
            },
            0,
            RunMode::Fixed,
        )
    }

    #[test]
    fn test_insert_and_remove() {
        let mut registry = JobRegistry::new();
        assert!(registry.is_empty());

        registry.insert(test_record("job-1"));
        registry.insert(test_record("job-2"));
        assert_eq!(registry.len(), 2);
        assert!(registry.get("job-1").is_some());

        let removed = registry.remove("job-1").expect("job-1 应该存在");
        assert_eq!(removed.job_id, "job-1");
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("job-1").is_none());
    }

    #[test]
    fn test_job_ids_keep_insertion_order() {
        let mut registry = JobRegistry::new();
        registry.insert(test_record("job-3"));
        registry.insert(test_record("job-1"));
        registry.insert(test_record("job-2"));

        assert_eq!(registry.job_ids(), vec!["job-3", "job-1", "job-2"]);

        registry.remove("job-1");
        assert_eq!(registry.job_ids(), vec!["job-3", "job-2"]);
    }

    #[test]
    fn test_job_id_appears_at_most_once() {
        let mut registry = JobRegistry::new();
        registry.insert(test_record("job-1"));
        let mut updated = test_record("job-1");
        updated.retry_count = 2;
        registry.insert(updated);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.job_ids(), vec!["job-1"]);
        assert_eq!(registry.get("job-1").unwrap().retry_count, 2);
    }
}
