//! 成绩汇总 - 业务能力层
//!
//! 从成绩表中的一行还原考生的完整成绩。科目数量由表头决定：
//! 依次检查 "Subject 1"、"Subject 2"……直到某一列不存在为止。

use crate::infrastructure::result_table::{
    stat_column, subject_column, StatKind, COL_CATEGORY, COL_GENDER, COL_NAME, COL_ROLL,
    COL_STATE,
};
use crate::infrastructure::FoundRow;
use crate::models::{CandidateInfo, CellValue, OverallSummary, ResultView, StatValue, SubjectView};

/// 汇总一行成绩
pub fn aggregate(exam: &str, found: &FoundRow) -> ResultView {
    let mut subjects = Vec::new();
    let mut overall = OverallSummary::default();

    let mut index = 1;
    while found.has_column(&subject_column(index)) {
        let subject = subject_view(found, index);

        // 只有采集过统计的科目才计入总体统计，缺失的单项不当作零
        if subject.attempt.is_captured() {
            add_captured(&mut overall.attempt, &subject.attempt);
            add_captured(&mut overall.right, &subject.right);
            add_captured(&mut overall.wrong, &subject.wrong);
            add_captured(&mut overall.na, &subject.na);
        }
        if let Some(marks) = subject.marks {
            overall.marks += marks;
        }

        subjects.push(subject);
        index += 1;
    }

    ResultView {
        exam: exam.to_string(),
        candidate: candidate_info(found),
        subjects,
        overall,
    }
}

fn add_captured(total: &mut u64, stat: &StatValue) {
    if let Some(n) = stat.count() {
        *total += n;
    }
}

fn subject_view(found: &FoundRow, index: usize) -> SubjectView {
    let stat = |kind| StatValue::from_cell(found.row.get(&stat_column(index, kind)));

    SubjectView {
        name: subject_column(index),
        attempt: stat(StatKind::Attempt),
        right: stat(StatKind::Right),
        wrong: stat(StatKind::Wrong),
        na: stat(StatKind::Na),
        marks: found
            .row
            .get(&subject_column(index))
            .and_then(CellValue::as_f64),
    }
}

fn candidate_info(found: &FoundRow) -> CandidateInfo {
    let text = |column: &str| {
        found
            .row
            .get(column)
            .map(|cell| cell.to_string())
            .unwrap_or_default()
    };

    CandidateInfo {
        name: text(COL_NAME),
        roll: text(COL_ROLL),
        category: text(COL_CATEGORY),
        gender: text(COL_GENDER),
        state: text(COL_STATE),
    }
}
