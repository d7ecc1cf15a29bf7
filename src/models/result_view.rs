//! 成绩查询结果
//!
//! 序列化后就是对外的查询响应结构

use crate::models::candidate::CandidateInfo;
use crate::models::cell::CellValue;
use serde::{Serialize, Serializer};

/// 未采集数据时显示的占位符
pub const MISSING_MARKER: &str = "-";

/// 统计字段的三态值
///
/// 区分"从未采集"和"测得为零"，聚合时不需要检查运行时类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Measured(u64),
    Zero,
    NotCaptured,
}

impl StatValue {
    pub fn from_count(n: u64) -> Self {
        if n == 0 {
            StatValue::Zero
        } else {
            StatValue::Measured(n)
        }
    }

    /// 从单元格读取；空单元格或非计数值都视为未采集
    pub fn from_cell(cell: Option<&CellValue>) -> Self {
        match cell.and_then(CellValue::as_count) {
            Some(n) => Self::from_count(n),
            None => StatValue::NotCaptured,
        }
    }

    pub fn is_captured(&self) -> bool {
        !matches!(self, StatValue::NotCaptured)
    }

    /// 已采集的计数
    pub fn count(&self) -> Option<u64> {
        match self {
            StatValue::Measured(n) => Some(*n),
            StatValue::Zero => Some(0),
            StatValue::NotCaptured => None,
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.count() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(MISSING_MARKER),
        }
    }
}

fn marks_or_marker<S: Serializer>(marks: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match marks {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(MISSING_MARKER),
    }
}

/// 单个科目的成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectView {
    pub name: String,
    pub attempt: StatValue,
    pub right: StatValue,
    pub wrong: StatValue,
    pub na: StatValue,
    /// 该行没有此科目分数时为 `None`
    #[serde(serialize_with = "marks_or_marker")]
    pub marks: Option<f64>,
}

/// 全部科目汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallSummary {
    pub attempt: u64,
    pub right: u64,
    pub wrong: u64,
    pub na: u64,
    pub marks: f64,
}

/// 一名考生的完整成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub exam: String,
    pub candidate: CandidateInfo,
    pub subjects: Vec<SubjectView>,
    pub overall: OverallSummary,
}
