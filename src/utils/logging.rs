/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；否则默认 `info`，开启详细日志时为 `debug`。
/// 重复初始化时静默忽略（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(api_base_url: &str, command: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验客户端");
    info!("🌐 后端地址: {}", api_base_url);
    info!("📋 命令: {}", command);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
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
        assert_eq!(truncate_text("What is the capital of France?", 7), "What is...");
        assert_eq!(truncate_text("法国的首都是哪里", 4), "法国的首...");
        assert_eq!(truncate_text("short", 80), "short");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
