//! 提交上下文
//!
//! 封装"哪场考试的哪位考生"这一信息

use crate::models::CandidateInfo;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct Submission {
    /// 考试名
    pub exam_id: String,

    /// 考生身份
    pub candidate: CandidateInfo,
}

impl Submission {
    pub fn new(exam_id: impl Into<String>, candidate: CandidateInfo) -> Self {
        Self {
            exam_id: exam_id.into(),
            candidate,
        }
    }
}

impl Display for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[考试 {} 考生 {}#{}]",
            self.exam_id, self.candidate.name, self.candidate.roll
        )
    }
}
