//! 批量评分 - 编排层
//!
//! 按清单并发评分多份提交：
//! - Semaphore 限制同时处理的提交数量
//! - 每份提交独立处理，失败只计数、记录日志，不中断整批
//! - 同一考试的写入由成绩表句柄的独占锁串行化

use crate::config::Config;
use crate::models::BatchManifest;
use crate::utils::logging::{log_batch_start, print_final_stats};
use crate::workflow::{EvaluationFlow, Submission};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 批量评分统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

pub struct BatchEvaluator {
    flow: EvaluationFlow,
    max_concurrent: usize,
}

impl BatchEvaluator {
    pub fn new(flow: EvaluationFlow, config: &Config) -> Self {
        Self {
            flow,
            max_concurrent: config.max_concurrent_submissions.max(1),
        }
    }

    /// 评分清单中的所有提交
    pub async fn run(&self, manifest: BatchManifest) -> Result<BatchStats> {
        let total = manifest.submissions.len();
        log_batch_start(&manifest.exam, total, self.max_concurrent);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(total);

        for (idx, entry) in manifest.submissions.into_iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = self.flow.clone();
            let submission = Submission::new(manifest.exam.clone(), entry.candidate);
            let file = entry.file;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.evaluate_file(&submission, &file).await.map_err(|e| {
                    error!("{} ❌ 评分失败: {}", submission, e);
                    e
                })
            });
            handles.push((idx + 1, handle));
        }

        let mut stats = BatchStats {
            total,
            ..Default::default()
        };

        for (index, handle) in handles {
            match handle.await {
                Ok(Ok(_)) => stats.success += 1,
                Ok(Err(_)) => stats.failed += 1,
                Err(e) => {
                    error!("[提交 {}] 任务执行失败: {}", index, e);
                    stats.failed += 1;
                }
            }
        }

        info!("考试 {} 批量评分结束", manifest.exam);
        print_final_stats(&stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ResultStore;
    use crate::models::{CandidateInfo, ManifestEntry, MarkingScheme};
    use crate::services::response_parser::tests::{document, panel, section};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_batch_counts_failures_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            max_concurrent_submissions: 3,
            ..Config::default()
        };

        let mut schemes = HashMap::new();
        schemes.insert("mock".to_string(), MarkingScheme::new("mock", 4.0, -1.0, 0.0));
        let flow = EvaluationFlow::new(Arc::new(schemes), Arc::new(ResultStore::new(&config)));
        flow.init_exam_table("mock").await.unwrap();

        let good = dir.path().join("good.html");
        std::fs::write(
            &good,
            document(&format!("{}{}", section("Physics"), panel(Some(1), Some(1)))),
        )
        .unwrap();

        let mut submissions = Vec::new();
        for i in 0..10 {
            submissions.push(ManifestEntry {
                candidate: CandidateInfo {
                    roll: i.to_string(),
                    ..Default::default()
                },
                file: if i == 7 {
                    dir.path().join("missing.html")
                } else {
                    good.clone()
                },
            });
        }

        let evaluator = BatchEvaluator::new(flow.clone(), &config);
        let stats = evaluator
            .run(BatchManifest {
                exam: "mock".to_string(),
                submissions,
            })
            .await
            .unwrap();

        assert_eq!(
            stats,
            BatchStats {
                total: 10,
                success: 9,
                failed: 1
            }
        );
        assert!(flow.query_result("mock", "3").await.is_ok());
        assert!(flow.query_result("mock", "7").await.unwrap_err().is_not_found());
    }
}
