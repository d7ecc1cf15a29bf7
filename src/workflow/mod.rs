pub mod evaluation_flow;
pub mod submission;

pub use evaluation_flow::{Evaluation, EvaluationFlow};
pub use submission::Submission;
