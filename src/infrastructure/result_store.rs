//! 成绩表注册表
//!
//! 每场考试一个 `ExamTable` 句柄，同一考试的所有调用方共享同一把锁；
//! 不同考试之间互不影响。

use crate::config::Config;
use crate::infrastructure::exam_table::ExamTable;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct ResultStore {
    config: Config,
    tables: Mutex<HashMap<String, Arc<ExamTable>>>,
}

impl ResultStore {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// 获取某场考试的成绩表句柄，首次访问时创建
    pub fn exam(&self, exam_id: &str) -> Arc<ExamTable> {
        let mut tables = self
            .tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        tables
            .entry(exam_id.to_string())
            .or_insert_with(|| {
                Arc::new(ExamTable::new(
                    exam_id,
                    self.config.table_path(exam_id),
                    self.lock_timeout(),
                ))
            })
            .clone()
    }

    fn lock_timeout(&self) -> Option<Duration> {
        self.config.lock_timeout()
    }
}
