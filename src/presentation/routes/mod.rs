// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::crawl_service::CrawlService;
use crate::domain::services::extraction_service::Extractor;
use crate::presentation::handlers::crawl_handler;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 路由在启动时显式构建一次，再交给服务器使用
///
/// # 参数
///
/// * `service` - 爬取服务
/// * `extractor` - `/crawler` 使用的提取器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(service: Arc<CrawlService>, extractor: Arc<dyn Extractor>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/crawler", get(crawl_handler::crawl))
        .layer(Extension(service))
        .layer(Extension(extractor))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
