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

use crate::engines::traits::{FetchError, FetchResult, Fetcher};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// 默认User-Agent
pub const DEFAULT_USER_AGENT: &str =
    concat!("Mozilla/5.0 (compatible; titlecrawl/", env!("CARGO_PKG_VERSION"), ")");

/// 抓取器
///
/// 基于reqwest实现的HTTP抓取器，所有请求共享同一个连接池
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// 使用指定的User-Agent创建抓取器
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 抓取器
    /// * `Err(FetchError)` - HTTP客户端初始化失败
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

/// 将发送阶段的reqwest错误映射为抓取错误
fn classify_send_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout)
    } else if error.is_builder() {
        FetchError::InvalidUrl(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `timeout` - 整个请求（包括读取响应体）的超时时间
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResult)` - 完整的响应体
    /// * `Err(FetchError)` - 抓取过程中出现的错误
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
        if url.is_empty() {
            return Err(FetchError::InvalidUrl("empty url".to_string()));
        }

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_send_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            // Dropping the response here releases the connection without reading the body
            return Err(FetchError::http_status(status.as_u16()));
        }

        let content = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::BodyRead(e.to_string())
            }
        })?;

        debug!(
            "Fetched {} ({} bytes) in {}ms",
            url,
            content.len(),
            start.elapsed().as_millis()
        );

        Ok(FetchResult {
            url: url.to_string(),
            content,
        })
    }

    /// 获取抓取器名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
