// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::cli::Cli;
use crate::engines::reqwest_engine::DEFAULT_USER_AGENT;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、抓取和日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 抓取配置
    pub crawler: CrawlerSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 优雅关闭的最长等待时间（秒）
    pub shutdown_timeout_secs: u64,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 单个URL抓取的超时时间（毫秒）
    pub fetch_timeout_ms: u64,
    /// 结果收集窗口（毫秒）
    pub window_timeout_ms: u64,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl ServerSettings {
    /// 监听地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl CrawlerSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn window_timeout(&self) -> Duration {
        Duration::from_millis(self.window_timeout_ms)
    }
}

impl Settings {
    /// 加载配置并应用命令行参数
    ///
    /// 命令行参数的优先级最高
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = Self::base_builder()?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        }
        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(level) = &cli.log_level {
            builder = builder.set_override("log.level", level.as_str())?;
        }

        Self::build(builder)
    }

    fn base_builder() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.shutdown_timeout_secs", 10)?
            // Default crawler settings
            .set_default("crawler.fetch_timeout_ms", 2000)?
            .set_default("crawler.window_timeout_ms", 2000)?
            .set_default("crawler.user_agent", DEFAULT_USER_AGENT)?
            // Default log settings
            .set_default("log.level", "debug")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TITLECRAWL").separator("__"));

        Ok(builder)
    }

    fn build(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crawler.fetch_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "crawler.fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.crawler.window_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "crawler.window_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Message("log.level must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
