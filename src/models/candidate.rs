use crate::models::tally::{ScoreSheet, SectionStats};
use serde::{Deserialize, Serialize};

/// 考生身份信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    #[serde(deserialize_with = "deserialize_roll")]
    pub roll: String,
    pub category: String,
    pub gender: String,
    pub state: String,
}

/// 写入成绩表的一行考生记录
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub candidate: CandidateInfo,
    pub total_marks: f64,
    pub section_marks: Vec<f64>,
    /// 旧式调用方可以不提供统计，此时统计列留空
    pub section_stats: Option<Vec<SectionStats>>,
}

impl CandidateRecord {
    pub fn from_score_sheet(candidate: CandidateInfo, sheet: ScoreSheet) -> Self {
        Self {
            candidate,
            total_marks: sheet.total_marks,
            section_marks: sheet.section_marks,
            section_stats: Some(sheet.section_stats),
        }
    }

    /// 只有分数、没有统计的记录
    pub fn marks_only(candidate: CandidateInfo, section_marks: Vec<f64>) -> Self {
        Self {
            candidate,
            total_marks: section_marks.iter().sum(),
            section_marks,
            section_stats: None,
        }
    }
}

// 准考证号既可能写成字符串，也可能写成整数
fn deserialize_roll<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct RollVisitor;

    impl<'de> Visitor<'de> for RollVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer roll id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(RollVisitor)
}
