use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 考试数据根目录（每场考试一个子目录）
    pub data_dir: PathBuf,
    /// 批量评分时同时处理的提交数量
    pub max_concurrent_submissions: usize,
    /// 获取考试锁的超时时间（毫秒），0 表示无限等待
    pub lock_timeout_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            max_concurrent_submissions: 8,
            lock_timeout_ms: 5000,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_dir: std::env::var("EXAM_DATA_DIR").map(PathBuf::from).unwrap_or(default.data_dir),
            max_concurrent_submissions: std::env::var("MAX_CONCURRENT_SUBMISSIONS").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.max_concurrent_submissions),
            lock_timeout_ms: std::env::var("LOCK_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.lock_timeout_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 锁超时，`None` 表示不设上限
    pub fn lock_timeout(&self) -> Option<Duration> {
        (self.lock_timeout_ms > 0).then(|| Duration::from_millis(self.lock_timeout_ms))
    }

    /// 某场考试的数据目录
    pub fn exam_dir(&self, exam_id: &str) -> PathBuf {
        self.data_dir.join(safe_name(exam_id))
    }

    /// 评分方案文件路径
    pub fn scheme_path(&self, exam_id: &str) -> PathBuf {
        self.exam_dir(exam_id).join("marking_scheme.toml")
    }

    /// 成绩表文件路径
    pub fn table_path(&self, exam_id: &str) -> PathBuf {
        self.exam_dir(exam_id).join("responses.json")
    }
}

/// 考试名转目录名：空格替换为下划线
pub fn safe_name(name: &str) -> String {
    name.replace(' ', "_")
}
