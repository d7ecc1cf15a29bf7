//! 评分方案来源

use crate::config::Config;
use crate::error::SchemeError;
use crate::models::{load_marking_scheme, MarkingScheme};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// 按考试提供评分方案
#[async_trait]
pub trait SchemeProvider: Send + Sync {
    async fn marking_scheme(&self, exam_id: &str) -> Result<MarkingScheme, SchemeError>;
}

/// 从考试目录下的 `marking_scheme.toml` 读取
pub struct FileSchemeProvider {
    config: Config,
}

impl FileSchemeProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn path_for(&self, exam_id: &str) -> PathBuf {
        self.config.scheme_path(exam_id)
    }
}

#[async_trait]
impl SchemeProvider for FileSchemeProvider {
    async fn marking_scheme(&self, exam_id: &str) -> Result<MarkingScheme, SchemeError> {
        let path = self.path_for(exam_id);
        match load_marking_scheme(&path).await {
            Err(SchemeError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Err(SchemeError::Missing {
                    exam_id: exam_id.to_string(),
                })
            }
            other => other,
        }
    }
}

/// 内存中的评分方案，按考试名索引
#[async_trait]
impl SchemeProvider for HashMap<String, MarkingScheme> {
    async fn marking_scheme(&self, exam_id: &str) -> Result<MarkingScheme, SchemeError> {
        self.get(exam_id).cloned().ok_or_else(|| SchemeError::Missing {
            exam_id: exam_id.to_string(),
        })
    }
}
