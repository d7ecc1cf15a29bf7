use serde::{Deserialize, Serialize};

/// 单个分区的作答统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTally {
    pub section_name: String,
    pub correct_count: u64,
    pub wrong_count: u64,
    pub na_count: u64,
}

impl SectionTally {
    pub fn new(section_name: impl Into<String>) -> Self {
        Self {
            section_name: section_name.into(),
            ..Default::default()
        }
    }

    /// 已作答题数（正确 + 错误）
    pub fn attempted(&self) -> u64 {
        self.correct_count + self.wrong_count
    }
}

/// 写入成绩表的分区统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStats {
    pub attempted: u64,
    pub right: u64,
    pub wrong: u64,
    pub na: u64,
}

impl From<&SectionTally> for SectionStats {
    fn from(tally: &SectionTally) -> Self {
        Self {
            attempted: tally.attempted(),
            right: tally.correct_count,
            wrong: tally.wrong_count,
            na: tally.na_count,
        }
    }
}

/// 单个分区的得分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub section_name: String,
    pub attempted: u64,
    pub marks: f64,
}

/// 一次提交的评分结果，顺序与分区首次出现的顺序一致
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSheet {
    pub total_marks: f64,
    pub section_marks: Vec<f64>,
    pub section_stats: Vec<SectionStats>,
}
