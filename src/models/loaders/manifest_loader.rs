use crate::models::candidate::CandidateInfo;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 批量评分清单
#[derive(Debug, Clone, Deserialize)]
pub struct BatchManifest {
    pub exam: String,
    #[serde(default)]
    pub submissions: Vec<ManifestEntry>,
}

/// 清单中的一份提交
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub candidate: CandidateInfo,
    /// 答题文档路径，相对路径按清单所在目录解析
    pub file: PathBuf,
}

/// 从 TOML 文件加载批量评分清单
pub async fn load_batch_manifest(manifest_path: &Path) -> Result<BatchManifest> {
    let content = fs::read_to_string(manifest_path)
        .await
        .with_context(|| format!("无法读取清单文件: {}", manifest_path.display()))?;

    let mut manifest: BatchManifest = toml::from_str(&content)
        .with_context(|| format!("无法解析清单文件: {}", manifest_path.display()))?;

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    for entry in manifest.submissions.iter_mut() {
        if entry.file.is_relative() {
            entry.file = base_dir.join(&entry.file);
        }
    }

    tracing::info!(
        "清单 {} 加载完成: 考试 {}, 共 {} 份提交",
        manifest_path.display(),
        manifest.exam,
        manifest.submissions.len()
    );

    Ok(manifest)
}
