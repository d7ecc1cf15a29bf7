//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_evaluator (处理整份清单)
//!     ↓
//! workflow::EvaluationFlow (处理单份提交)
//!     ↓
//! services (能力层：parse / score / aggregate)
//!     ↓
//! infrastructure (基础设施：成绩表文件与锁)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断

pub mod batch_evaluator;

pub use batch_evaluator::{BatchEvaluator, BatchStats};
