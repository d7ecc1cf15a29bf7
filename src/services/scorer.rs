//! 评分 - 业务能力层
//!
//! 纯函数：分区统计 + 评分方案 → 各分区得分与总分

use crate::models::{MarkingScheme, ScoreSheet, SectionScore, SectionStats, SectionTally};

/// 按评分方案计算单个分区得分
pub fn score_section(tally: &SectionTally, scheme: &MarkingScheme) -> SectionScore {
    let marks = tally.correct_count as f64 * scheme.correct_weight
        + tally.wrong_count as f64 * scheme.wrong_weight
        + tally.na_count as f64 * scheme.na_weight;

    SectionScore {
        section_name: tally.section_name.clone(),
        attempted: tally.attempted(),
        marks,
    }
}

/// 计算所有分区得分，输出顺序与输入一致
pub fn score(tallies: &[SectionTally], scheme: &MarkingScheme) -> ScoreSheet {
    let mut sheet = ScoreSheet::default();

    for tally in tallies {
        let section = score_section(tally, scheme);
        sheet.total_marks += section.marks;
        sheet.section_marks.push(section.marks);
        sheet.section_stats.push(SectionStats::from(tally));
    }

    sheet
}
