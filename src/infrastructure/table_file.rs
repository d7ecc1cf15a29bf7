//! 成绩表文件读写
//!
//! 整表读入、整表写回。写入先落到同目录下唯一命名的临时文件，再原子替换正式文件，
//! 中途失败不会留下半张表。
//!
//! 多个进程可能同时处理同一场考试，"读 → 改 → 写"周期由旁边的 `.lock` 文件上的
//! 建议锁串行化（查询持共享锁，追加持独占锁）。

use crate::error::{AppError, AppResult, StoreError};
use crate::infrastructure::result_table::ResultTable;
use fs4::fs_std::FileExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 文件锁模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// 持有中的文件锁，离开作用域即释放
#[derive(Debug)]
pub struct TableLock {
    _file: std::fs::File,
}

/// 读取成绩表
///
/// 空文件视为没有表头
pub async fn load_table(exam_id: &str, path: &Path) -> AppResult<ResultTable> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::TableNotFound {
                path: path.to_path_buf(),
            }
            .into())
        }
        Err(e) => return Err(AppError::table_io(path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(StoreError::MissingHeader {
            exam_id: exam_id.to_string(),
        }
        .into());
    }

    let table: ResultTable =
        serde_json::from_slice(&bytes).map_err(|e| AppError::table_format(path, e))?;
    debug!(
        "读取成绩表 {}: {} 列, {} 行",
        path.display(),
        table.columns().len(),
        table.rows().len()
    );
    Ok(table)
}

/// 原子写回成绩表
pub async fn save_table(path: &Path, table: &ResultTable) -> AppResult<()> {
    let data = serde_json::to_vec_pretty(table).map_err(|e| AppError::table_format(path, e))?;
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_replacing(&target, &data))
        .await
        .map_err(|e| AppError::table_io(path, std::io::Error::other(e)))??;

    debug!("成绩表已写入: {}", path.display());
    Ok(())
}

/// 获取成绩表的跨进程文件锁，阻塞等待放在阻塞线程池中
///
/// 所在目录不存在时返回 `TableNotFound`
pub async fn lock_table(path: &Path, mode: LockMode) -> AppResult<TableLock> {
    let lock_path = lock_path_for(path);
    let table_path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> AppResult<TableLock> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StoreError::TableNotFound { path: table_path }.into(),
                _ => AppError::table_io(&lock_path, e),
            })?;

        let locked = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|e| AppError::table_io(&lock_path, e))?;
        Ok(TableLock { _file: file })
    })
    .await
    .map_err(|e| AppError::table_io(path, std::io::Error::other(e)))?
}

/// 写入同目录的临时文件后改名替换；出错时临时文件随之删除
fn write_replacing(path: &Path, data: &[u8]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".responses-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| AppError::table_io(dir, e))?;
    temp.write_all(data)
        .map_err(|e| AppError::table_io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| AppError::table_io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| AppError::table_io(path, e.error))?;
    Ok(())
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "responses.json".into());
    name.push(".lock");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateInfo, CandidateRecord};
    use std::time::Duration;

    fn table_with(roll: &str, marks: Vec<f64>) -> ResultTable {
        let mut table = ResultTable::with_fixed_columns();
        table
            .append_record(
                "mock",
                &CandidateRecord::marks_only(
                    CandidateInfo {
                        name: "Asha".to_string(),
                        roll: roll.to_string(),
                        ..Default::default()
                    },
                    marks,
                ),
            )
            .unwrap();
        table
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_columns_and_sparse_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        let table = table_with("1001", vec![30.0, 20.0]);

        save_table(&path, &table).await.unwrap();
        let loaded = load_table("mock", &path).await.unwrap();

        assert_eq!(loaded, table);
        assert_eq!(file_names(dir.path()), vec!["responses.json"]);
    }

    #[tokio::test]
    async fn test_parallel_saves_never_leave_a_partial_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");

        let mut handles = Vec::new();
        for i in 0..12 {
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                let table = table_with(&i.to_string(), vec![1.0; 50 + i]);
                save_table(&path, &table).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let loaded = load_table("mock", &path).await.unwrap();
        assert_eq!(loaded.rows().len(), 1);
        assert_eq!(file_names(dir.path()), vec!["responses.json"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_table_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table("mock", &dir.path().join("responses.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::TableNotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");

        for contents in ["", "  \n"] {
            std::fs::write(&path, contents).unwrap();
            let err = load_table("mock", &path).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Store(StoreError::MissingHeader { exam_id }) if exam_id == "mock"
            ));
        }
    }

    #[tokio::test]
    async fn test_corrupted_file_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_table("mock", &path).await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::Format { .. })));
    }

    #[tokio::test]
    async fn test_exclusive_lock_blocks_other_holders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");

        let held = lock_table(&path, LockMode::Exclusive).await.unwrap();
        let waiting =
            tokio::time::timeout(Duration::from_millis(50), lock_table(&path, LockMode::Shared)).await;
        assert!(waiting.is_err());

        drop(held);
        let _shared = lock_table(&path, LockMode::Shared).await.unwrap();
        let _other = lock_table(&path, LockMode::Shared).await.unwrap();
    }

    #[tokio::test]
    async fn test_lock_in_missing_directory_is_table_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = lock_table(&dir.path().join("nope").join("responses.json"), LockMode::Shared)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::TableNotFound { .. })));
    }

    #[test]
    fn test_lock_path_is_sibling() {
        assert_eq!(
            lock_path_for(Path::new("/data/mock/responses.json")),
            PathBuf::from("/data/mock/responses.json.lock")
        );
    }
}
