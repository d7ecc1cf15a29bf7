use crate::error::SchemeError;
use crate::models::scheme::MarkingScheme;
use std::path::Path;

/// 从 TOML 键值文件加载评分方案
///
/// 文件格式：
/// ```toml
/// "Exam Name" = "JEE Mock 1"
/// Correct = 4
/// Wrong = -1
/// NA = 0
/// ```
pub async fn load_marking_scheme(path: &Path) -> Result<MarkingScheme, SchemeError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SchemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let table: toml::Table = toml::from_str(&content).map_err(|source| SchemeError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    let scheme = MarkingScheme::from_key_values(&table)?;
    tracing::debug!(
        "加载评分方案 {}: 正确 {} / 错误 {} / 未答 {}",
        scheme.exam_id,
        scheme.correct_weight,
        scheme.wrong_weight,
        scheme.na_weight
    );

    Ok(scheme)
}
