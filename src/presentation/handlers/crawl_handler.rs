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

use axum::{
    extract::{Extension, RawQuery},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    domain::services::{crawl_service::CrawlService, extraction_service::Extractor},
    utils::url_utils::filter_urls,
};

/// 缺少 `url` 参数时返回的提示
pub const MISSING_URL_MESSAGE: &str = "Query param 'url' is missing";

/// 从查询字符串中取出所有 `url` 参数
///
/// 没有 `url` 参数，或第一个 `url` 为空时返回 `None`
pub fn url_params(query: Option<&str>) -> Option<Vec<String>> {
    let urls: Vec<String> = url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .collect();

    match urls.first() {
        Some(first) if !first.is_empty() => Some(urls),
        _ => None,
    }
}

/// 批量抓取页面标题
///
/// `GET /crawler?url=<u1>&url=<u2>...`
///
/// 应用层的失败不会产生非200状态码：缺少参数时返回文本提示，
/// 否则返回收集窗口内完成的结果数组
pub async fn crawl(
    Extension(service): Extension<Arc<CrawlService>>,
    Extension(extractor): Extension<Arc<dyn Extractor>>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(urls) = url_params(query.as_deref()) else {
        return MISSING_URL_MESSAGE.into_response();
    };

    let urls = filter_urls(urls);
    debug!("Crawling {} unique url(s)", urls.len());

    let results = service.aggregate(urls, extractor).await;

    let body = serde_json::to_string(&results).unwrap_or_else(|e| {
        warn!("Failed to serialize crawl results: {}", e);
        String::new()
    });

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
