//! # Exam Evaluate
//!
//! 考试答卷评分与成绩存储
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有成绩表文件资源，只暴露读写能力
//! - `ResultTable` - 只增不减的列注册表 + 稀疏行
//! - `ExamTable` - 单场考试的成绩表句柄，自带读写锁
//! - `ResultStore` - 按考试分发句柄
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，全部是无副作用的计算
//! - `response_parser` - 解析答题文档，得到各分区统计
//! - `scorer` - 按评分方案计算得分
//! - `result_aggregator` - 从成绩表行还原考生成绩
//!
//! ### ③ 流程层（Workflow）
//! - `EvaluationFlow` - 一份提交的完整流程（方案 → 解析 → 评分 → 写表）
//!
//! ### ④ 编排层（Orchestration）
//! - `BatchEvaluator` - 按清单并发评分

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ExamTable, ResultStore, ResultTable};
pub use models::{CandidateInfo, CandidateRecord, MarkingScheme, ResultView, SectionTally};
pub use orchestrator::{BatchEvaluator, BatchStats};
pub use services::{FileSchemeProvider, SchemeProvider};
pub use workflow::{Evaluation, EvaluationFlow, Submission};
