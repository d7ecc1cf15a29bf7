//! 基础设施层
//!
//! 持有稀缺资源（成绩表文件及其锁），只暴露读写能力

pub mod exam_table;
pub mod result_store;
pub mod result_table;
pub mod table_file;

pub use exam_table::{ExamTable, FoundRow};
pub use result_store::ResultStore;
pub use result_table::{
    stat_column, subject_column, ResultTable, Row, StatKind, FIXED_COLUMNS,
};
