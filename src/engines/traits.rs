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

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// 抓取错误类型
///
/// 每个变体都只影响单个URL，不会中断同一请求中的其他任务
#[derive(Error, Debug)]
pub enum FetchError {
    /// 连接层失败（DNS、拒绝连接、连接重置等）
    #[error("transport error: {0}")]
    Transport(String),
    /// 在超时时间内没有收到响应
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// 非成功状态码
    #[error("request error with status {code} {reason}")]
    HttpStatus { code: u16, reason: String },
    /// 响应体未能完整读取
    #[error("failed to read response body: {0}")]
    BodyRead(String),
    /// URL无法构造请求
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// 根据状态码构造 `HttpStatus` 错误，附带标准原因短语
    pub fn http_status(code: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("")
            .to_string();
        FetchError::HttpStatus { code, reason }
    }
}

/// 抓取结果
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// 产生该内容的URL
    pub url: String,
    /// 完整的响应体
    pub content: Bytes,
}

/// 抓取器特质
///
/// 一次调用对应一次带超时的GET请求，不做任何重试
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 获取URL的原始内容
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
