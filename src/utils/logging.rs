/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::orchestrator::BatchStats;
use tracing::info;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 考试答卷评分");
    info!("📁 数据目录: {}", config.data_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录批量评分开始
///
/// # 参数
/// - `exam`: 考试名
/// - `total`: 提交总数
/// - `max_concurrent`: 最大并发数
pub fn log_batch_start(exam: &str, total: usize, max_concurrent: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 考试 {} 开始批量评分", exam);
    info!("📄 共 {} 份提交, 最大并发数 {}", total, max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &BatchStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("物理化学生物", 2), "物理...");
        assert_eq!(truncate_text("Physics", 20), "Physics");
    }
}
