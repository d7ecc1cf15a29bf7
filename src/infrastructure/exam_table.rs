//! 单场考试的成绩表句柄
//!
//! 成绩表是整文件资源，追加是"读 → 改 → 写"的完整周期。
//! 句柄自带读写锁：追加独占，查询共享；锁守卫离开作用域即释放，失败路径同样释放。
//! 进程内的读写锁之外还要再取成绩表的文件锁，多个进程处理同一场考试时同样互斥。

use crate::error::{AppError, AppResult, StoreError};
use crate::infrastructure::result_table::{ResultTable, Row};
use crate::infrastructure::table_file::{self, LockMode, TableLock};
use crate::models::CandidateRecord;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// 查询命中的行，连同当时的表头
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRow {
    pub columns: Vec<String>,
    pub row: Row,
}

impl FoundRow {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

pub struct ExamTable {
    exam_id: String,
    path: PathBuf,
    lock: RwLock<()>,
    lock_timeout: Option<Duration>,
}

impl ExamTable {
    pub fn new(exam_id: impl Into<String>, path: PathBuf, lock_timeout: Option<Duration>) -> Self {
        Self {
            exam_id: exam_id.into(),
            path,
            lock: RwLock::new(()),
            lock_timeout,
        }
    }

    pub fn exam_id(&self) -> &str {
        &self.exam_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 初始化只有固定表头的空表；已存在则保持不变
    ///
    /// 返回是否新建了文件
    pub async fn create(&self) -> AppResult<bool> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::table_io(parent, e))?;
        }

        let _guard = self.acquire(self.lock.write(), LockMode::Exclusive).await?;

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| AppError::table_io(&self.path, e))?;
        if exists {
            debug!("[考试 {}] 成绩表已存在，跳过初始化", self.exam_id);
            return Ok(false);
        }

        table_file::save_table(&self.path, &ResultTable::with_fixed_columns()).await?;
        info!("[考试 {}] ✓ 成绩表已初始化: {}", self.exam_id, self.path.display());
        Ok(true)
    }

    /// 追加一名考生，返回新行号
    pub async fn append_row(&self, record: &CandidateRecord) -> AppResult<usize> {
        let _guard = self.acquire(self.lock.write(), LockMode::Exclusive).await?;

        let mut table = table_file::load_table(&self.exam_id, &self.path).await?;
        let columns_before = table.columns().len();
        let row = table.append_record(&self.exam_id, record)?;
        table_file::save_table(&self.path, &table).await?;

        let added = table.columns().len() - columns_before;
        if added > 0 {
            debug!("[考试 {}] 表头新增 {} 列", self.exam_id, added);
        }
        debug!(
            "[考试 {}] 考生 {} 写入第 {} 行",
            self.exam_id,
            record.candidate.roll,
            row + 1
        );
        Ok(row)
    }

    /// 按准考证号查找第一条匹配的行
    pub async fn find_row_by_roll_id(&self, roll: &str) -> AppResult<FoundRow> {
        let _guard = self.acquire(self.lock.read(), LockMode::Shared).await?;

        let table = table_file::load_table(&self.exam_id, &self.path).await?;
        let row = table.find_row_by_roll_id(&self.exam_id, roll)?;
        Ok(FoundRow {
            columns: table.columns().to_vec(),
            row: row.clone(),
        })
    }

    /// 读取整张表（共享锁）
    pub async fn snapshot(&self) -> AppResult<ResultTable> {
        let _guard = self.acquire(self.lock.read(), LockMode::Shared).await?;
        table_file::load_table(&self.exam_id, &self.path).await
    }

    /// 先取进程内的锁，再取文件锁；超时覆盖两者
    async fn acquire<G>(
        &self,
        lock: impl Future<Output = G>,
        mode: LockMode,
    ) -> AppResult<(G, TableLock)> {
        let both = async {
            let guard = lock.await;
            let file_lock = table_file::lock_table(&self.path, mode).await?;
            Ok::<_, AppError>((guard, file_lock))
        };

        match self.lock_timeout {
            None => both.await,
            Some(timeout) => tokio::time::timeout(timeout, both).await.map_err(|_| {
                warn!("[考试 {}] ⚠️ 获取锁超时", self.exam_id);
                AppError::from(StoreError::LockTimeout {
                    exam_id: self.exam_id.clone(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            })?,
        }
    }
}
