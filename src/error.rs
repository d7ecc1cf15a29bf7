use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 答题文档解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 评分方案错误
    #[error("评分方案错误: {0}")]
    Scheme(#[from] SchemeError),
    /// 成绩表存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 读取答题文档失败
    #[error("读取答题文档失败 ({path}): {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 答题文档解析错误
///
/// 只影响单次提交，不影响服务本身
#[derive(Debug, Error)]
pub enum ParseError {
    /// 文档中没有任何分区标签
    #[error("文档中没有可识别的分区标签")]
    NoSections,
    /// 题目面板出现在任何分区标签之前
    #[error("第 {panel_index} 个题目面板出现在任何分区标签之前")]
    PanelOutsideSection { panel_index: usize },
    /// 所选选项无法解析为整数
    #[error("分区 {section} 中的所选选项无法解析: '{value}'")]
    InvalidChosenOption { section: String, value: String },
}

/// 评分方案错误
#[derive(Debug, Error)]
pub enum SchemeError {
    /// 评分方案不存在
    #[error("考试 {exam_id} 的评分方案不存在")]
    Missing { exam_id: String },
    /// 缺少必需的键
    #[error("评分方案缺少键: {key}")]
    MissingKey { key: String },
    /// 权重不是数值
    #[error("评分方案中 {key} 的值不是数值: {value}")]
    NotNumeric { key: String, value: String },
    /// 读取评分方案文件失败
    #[error("读取评分方案失败 ({path}): {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("评分方案 TOML 解析失败 ({path}): {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 成绩表存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 成绩表没有表头，可能未初始化或已损坏
    #[error("考试 {exam_id} 的成绩表没有表头")]
    MissingHeader { exam_id: String },
    /// 表头中缺少必需的列
    #[error("成绩表缺少列: {column}")]
    MissingColumn { column: String },
    /// 行号超出范围
    #[error("行号 {row} 超出范围 (共 {len} 行)")]
    RowOutOfRange { row: usize, len: usize },
    /// 单元格值不是有限数值，JSON 无法表示
    #[error("列 {column} 的值不是有限数值: {value}")]
    NonFiniteValue { column: String, value: f64 },
    /// 成绩表文件不存在
    #[error("成绩表文件不存在: {path}")]
    TableNotFound { path: PathBuf },
    /// 找不到考生
    #[error("找不到考生: {roll}")]
    NotFound { roll: String },
    /// 获取考试锁超时，调用方可重试
    #[error("获取考试 {exam_id} 的锁超时 ({timeout_ms}ms)")]
    LockTimeout { exam_id: String, timeout_ms: u64 },
    /// 读写成绩表文件失败
    #[error("成绩表文件读写失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 成绩表 JSON 格式错误
    #[error("成绩表格式错误 ({path}): {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建成绩表读写错误
    pub fn table_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Store(StoreError::Io {
            path: path.into(),
            source,
        })
    }

    /// 创建成绩表格式错误
    pub fn table_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::Store(StoreError::Format {
            path: path.into(),
            source,
        })
    }

    /// 是否为"找不到考生"
    ///
    /// 这类错误应报告为业务结果，而不是系统故障
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Store(StoreError::NotFound { .. }))
    }

    /// 是否为锁超时（可重试）
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Store(StoreError::LockTimeout { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_recoverable() {
        let err: AppError = StoreError::NotFound {
            roll: "42".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_lock_timeout_is_retryable() {
        let err: AppError = StoreError::LockTimeout {
            exam_id: "mock".to_string(),
            timeout_ms: 10,
        }
        .into();
        assert!(err.is_retryable());
    }
}
