//! 成绩表：只增不减的列注册表 + 稀疏行
//!
//! - 列一旦加入就不会删除、改名或调整顺序，新列总是追加到末尾
//! - 每行是"列名 → 值"的映射，旧行缺少的列读出来就是空
//! - 追加考生只会新增一行，不会改写已有行

use crate::error::StoreError;
use crate::models::{CandidateRecord, CellValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COL_NAME: &str = "Name";
pub const COL_ROLL: &str = "Roll";
pub const COL_CATEGORY: &str = "Category";
pub const COL_GENDER: &str = "Gender";
pub const COL_STATE: &str = "State";
pub const COL_TOTAL_MARKS: &str = "Total Marks";

/// 固定的前导列
pub const FIXED_COLUMNS: [&str; 6] = [
    COL_NAME,
    COL_ROLL,
    COL_CATEGORY,
    COL_GENDER,
    COL_STATE,
    COL_TOTAL_MARKS,
];

/// 第 `index` 个科目（从 1 开始）的分数列
pub fn subject_column(index: usize) -> String {
    format!("Subject {}", index)
}

/// 统计种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Attempt,
    Right,
    Wrong,
    Na,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Attempt,
        StatKind::Right,
        StatKind::Wrong,
        StatKind::Na,
    ];

    fn suffix(self) -> &'static str {
        match self {
            StatKind::Attempt => "Attempt",
            StatKind::Right => "R",
            StatKind::Wrong => "W",
            StatKind::Na => "NA",
        }
    }
}

/// 第 `index` 个科目的统计列，例如 `S1_Attempt`
pub fn stat_column(index: usize, kind: StatKind) -> String {
    format!("S{}_{}", index, kind.suffix())
}

/// 一行数据
pub type Row = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl ResultTable {
    /// 只有固定列表头的空表
    pub fn with_fixed_columns() -> Self {
        Self {
            columns: FIXED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_header(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 确保列存在，不存在则追加到末尾；返回该列的位置
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(pos) = self.columns.iter().position(|c| c == name) {
            return pos;
        }
        self.columns.push(name.to_string());
        self.columns.len() - 1
    }

    /// 追加一个空行，返回行号
    pub fn push_row(&mut self) -> usize {
        self.rows.push(Row::new());
        self.rows.len() - 1
    }

    /// 写入单元格，列必须已经在表头中；拒绝 inf / nan
    pub fn set_cell(
        &mut self,
        row: usize,
        column: &str,
        value: impl Into<CellValue>,
    ) -> Result<(), StoreError> {
        if !self.has_column(column) {
            return Err(StoreError::MissingColumn {
                column: column.to_string(),
            });
        }
        let value = value.into();
        if let CellValue::Float(f) = value {
            if !f.is_finite() {
                return Err(StoreError::NonFiniteValue {
                    column: column.to_string(),
                    value: f,
                });
            }
        }
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(StoreError::RowOutOfRange { row, len })?;
        target.insert(column.to_string(), value);
        Ok(())
    }

    /// 追加一名考生，必要时扩展表头；返回新行号
    ///
    /// 先补齐所有科目分数列，再写入行，最后按需补齐统计列。
    /// 没有统计的记录，统计单元格保持为空而不是零。
    pub fn append_record(
        &mut self,
        exam_id: &str,
        record: &CandidateRecord,
    ) -> Result<usize, StoreError> {
        if !self.has_header() {
            return Err(StoreError::MissingHeader {
                exam_id: exam_id.to_string(),
            });
        }

        // 表头损坏时不自动补列
        if let Some(missing) = FIXED_COLUMNS.iter().find(|c| !self.has_column(c)) {
            return Err(StoreError::MissingColumn {
                column: missing.to_string(),
            });
        }
        for i in 1..=record.section_marks.len() {
            self.ensure_column(&subject_column(i));
        }

        let row = self.push_row();
        if let Err(e) = self.fill_row(row, record) {
            self.rows.truncate(row);
            return Err(e);
        }
        Ok(row)
    }

    fn fill_row(&mut self, row: usize, record: &CandidateRecord) -> Result<(), StoreError> {
        let candidate = &record.candidate;
        self.set_cell(row, COL_NAME, candidate.name.as_str())?;
        self.set_cell(row, COL_ROLL, candidate.roll.as_str())?;
        self.set_cell(row, COL_CATEGORY, candidate.category.as_str())?;
        self.set_cell(row, COL_GENDER, candidate.gender.as_str())?;
        self.set_cell(row, COL_STATE, candidate.state.as_str())?;
        self.set_cell(row, COL_TOTAL_MARKS, record.total_marks)?;
        for (i, marks) in record.section_marks.iter().enumerate() {
            self.set_cell(row, &subject_column(i + 1), *marks)?;
        }

        if let Some(stats) = &record.section_stats {
            for (i, stat) in stats.iter().enumerate() {
                let values = [stat.attempted, stat.right, stat.wrong, stat.na];
                for (kind, value) in StatKind::ALL.into_iter().zip(values) {
                    let column = stat_column(i + 1, kind);
                    self.ensure_column(&column);
                    self.set_cell(row, &column, value)?;
                }
            }
        }
        Ok(())
    }

    /// 按准考证号查找，按插入顺序返回第一条匹配的行
    pub fn find_row_by_roll_id(&self, exam_id: &str, roll: &str) -> Result<&Row, StoreError> {
        if !self.has_header() {
            return Err(StoreError::MissingHeader {
                exam_id: exam_id.to_string(),
            });
        }
        if !self.has_column(COL_ROLL) {
            return Err(StoreError::MissingColumn {
                column: COL_ROLL.to_string(),
            });
        }

        let wanted = roll.trim();
        self.rows
            .iter()
            .find(|row| {
                row.get(COL_ROLL)
                    .map(|cell| cell.to_string().trim() == wanted)
                    .unwrap_or(false)
            })
            .ok_or_else(|| StoreError::NotFound {
                roll: roll.to_string(),
            })
    }
}
