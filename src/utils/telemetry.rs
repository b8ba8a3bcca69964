// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("failed to build log filter: {0}")]
    Filter(String),
}

/// 解析日志级别
///
/// 只接受 trace、debug、info、warn、error（不区分大小写）
pub fn parse_level(level: &str) -> Result<LevelFilter, TelemetryError> {
    let trimmed = level.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("off") {
        return Err(TelemetryError::InvalidLevel(level.to_string()));
    }
    LevelFilter::from_str(trimmed).map_err(|_| TelemetryError::InvalidLevel(level.to_string()))
}

/// 构造日志过滤器
///
/// 设置了 `RUST_LOG` 时以环境变量为准，否则使用配置的级别
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    let level = parse_level(level)?;

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(format!("{},titlecrawl={}", level, level))
            .map_err(|e| TelemetryError::Filter(e.to_string())),
    }
}

/// 初始化日志系统
///
/// 重复调用不会报错，已安装的订阅者保持不变
pub fn init_telemetry(level: &str) -> Result<(), TelemetryError> {
    let filter = build_filter(level)?;

    // A subscriber may already be installed (tests, embedding applications)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    Ok(())
}

#[cfg(test)]
#[path = "telemetry_test.rs"]
mod tests;
