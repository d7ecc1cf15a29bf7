//! 评分流程 - 流程层
//!
//! 一份提交的完整处理流程：
//! 1. 读取评分方案
//! 2. 解析答题文档
//! 3. 计算得分
//! 4. 追加到成绩表（持有该考试的独占锁）

use crate::error::{AppError, AppResult};
use crate::infrastructure::ResultStore;
use crate::models::{CandidateRecord, ResultView, ScoreSheet, SectionTally};
use crate::services::{aggregate, parse_response, score, SchemeProvider};
use crate::utils::logging::truncate_text;
use crate::workflow::submission::Submission;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 一次评分的结果
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub tallies: Vec<SectionTally>,
    pub sheet: ScoreSheet,
    /// 写入成绩表的行号（从 0 开始）
    pub row: usize,
}

/// 评分流程
///
/// 不持有成绩表文件，只通过 `ResultStore` 取得各考试的句柄
#[derive(Clone)]
pub struct EvaluationFlow {
    schemes: Arc<dyn SchemeProvider>,
    store: Arc<ResultStore>,
}

impl EvaluationFlow {
    pub fn new(schemes: Arc<dyn SchemeProvider>, store: Arc<ResultStore>) -> Self {
        Self { schemes, store }
    }

    /// 评分并保存一份答题文档
    pub async fn evaluate(&self, submission: &Submission, document: &str) -> AppResult<Evaluation> {
        let scheme = self.schemes.marking_scheme(&submission.exam_id).await?;

        let tallies = parse_response(document).map_err(|e| {
            warn!("{} ⚠️ 答题文档解析失败: {}", submission, e);
            debug!("{} 文档开头: {}", submission, truncate_text(document.trim(), 120));
            e
        })?;
        for tally in &tallies {
            debug!(
                "{} 分区 {}: 正确 {} / 错误 {} / 未答 {}",
                submission,
                tally.section_name,
                tally.correct_count,
                tally.wrong_count,
                tally.na_count
            );
        }

        let sheet = score(&tallies, &scheme);
        let record = CandidateRecord::from_score_sheet(submission.candidate.clone(), sheet.clone());

        let row = self
            .store
            .exam(&submission.exam_id)
            .append_row(&record)
            .await?;

        info!(
            "{} ✓ 评分完成: {} 个分区, 总分 {}",
            submission,
            tallies.len(),
            sheet.total_marks
        );

        Ok(Evaluation { tallies, sheet, row })
    }

    /// 从文件读取答题文档并评分
    ///
    /// 非 UTF-8 字节按替换字符处理
    pub async fn evaluate_file(&self, submission: &Submission, path: &Path) -> AppResult<Evaluation> {
        let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        let document = String::from_utf8_lossy(&bytes);
        self.evaluate(submission, &document).await
    }

    /// 查询一名考生的成绩
    pub async fn query_result(&self, exam_id: &str, roll: &str) -> AppResult<ResultView> {
        let found = self.store.exam(exam_id).find_row_by_roll_id(roll).await?;
        Ok(aggregate(exam_id, &found))
    }

    /// 初始化考试的空成绩表，已存在则不变
    pub async fn init_exam_table(&self, exam_id: &str) -> AppResult<bool> {
        self.store.exam(exam_id).create().await
    }
}
