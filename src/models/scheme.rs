use crate::error::SchemeError;
use serde::{Deserialize, Serialize};

/// 评分方案中的键名
pub const KEY_EXAM_NAME: &str = "Exam Name";
pub const KEY_CORRECT: &str = "Correct";
pub const KEY_WRONG: &str = "Wrong";
pub const KEY_NA: &str = "NA";

/// 评分方案：每场考试一组权重，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkingScheme {
    pub exam_id: String,
    pub correct_weight: f64,
    pub wrong_weight: f64,
    pub na_weight: f64,
}

impl MarkingScheme {
    pub fn new(
        exam_id: impl Into<String>,
        correct_weight: f64,
        wrong_weight: f64,
        na_weight: f64,
    ) -> Self {
        Self {
            exam_id: exam_id.into(),
            correct_weight,
            wrong_weight,
            na_weight,
        }
    }

    /// 从键值表构建评分方案
    ///
    /// 必须包含 "Exam Name"、"Correct"、"Wrong"、"NA" 四个键，权重可以是整数、小数或数值字符串
    pub fn from_key_values(table: &toml::Table) -> Result<Self, SchemeError> {
        let exam_id = match table.get(KEY_EXAM_NAME) {
            Some(toml::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                return Err(SchemeError::MissingKey {
                    key: KEY_EXAM_NAME.to_string(),
                })
            }
        };

        Ok(Self {
            exam_id,
            correct_weight: weight(table, KEY_CORRECT)?,
            wrong_weight: weight(table, KEY_WRONG)?,
            na_weight: weight(table, KEY_NA)?,
        })
    }
}

fn weight(table: &toml::Table, key: &str) -> Result<f64, SchemeError> {
    let value = table.get(key).ok_or_else(|| SchemeError::MissingKey {
        key: key.to_string(),
    })?;

    let not_numeric = || SchemeError::NotNumeric {
        key: key.to_string(),
        value: value.to_string(),
    };

    let weight = match value {
        toml::Value::Integer(i) => *i as f64,
        toml::Value::Float(f) => *f,
        toml::Value::String(s) => s.trim().parse::<f64>().map_err(|_| not_numeric())?,
        _ => return Err(not_numeric()),
    };

    // inf / nan 无法写入成绩表
    if !weight.is_finite() {
        return Err(not_numeric());
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_from_key_values_accepts_int_and_float_weights() {
        let scheme = MarkingScheme::from_key_values(&table(
            r#"
            "Exam Name" = "JEE Mock 1"
            Correct = 4
            Wrong = -0.25
            NA = "0"
            "#,
        ))
        .unwrap();

        assert_eq!(scheme, MarkingScheme::new("JEE Mock 1", 4.0, -0.25, 0.0));
    }

    #[test]
    fn test_missing_weight_is_rejected() {
        let err = MarkingScheme::from_key_values(&table(
            r#"
            "Exam Name" = "JEE Mock 1"
            Correct = 4
            NA = 0
            "#,
        ))
        .unwrap_err();

        assert!(matches!(err, SchemeError::MissingKey { key } if key == "Wrong"));
    }

    #[test]
    fn test_non_numeric_weight_is_rejected() {
        let err = MarkingScheme::from_key_values(&table(
            r#"
            "Exam Name" = "JEE Mock 1"
            Correct = "four"
            Wrong = -1
            NA = 0
            "#,
        ))
        .unwrap_err();

        assert!(matches!(err, SchemeError::NotNumeric { key, .. } if key == "Correct"));
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        for na in ["inf", "nan", "\"-inf\"", "\"NaN\""] {
            let err = MarkingScheme::from_key_values(&table(&format!(
                "\"Exam Name\" = \"JEE Mock 1\"\nCorrect = 4\nWrong = -1\nNA = {}\n",
                na
            )))
            .unwrap_err();

            assert!(matches!(err, SchemeError::NotNumeric { key, .. } if key == "NA"));
        }
    }
}
