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

use clap::Parser;
use std::sync::Arc;
use titlecrawl::config::cli::Cli;
use titlecrawl::config::settings::Settings;
use titlecrawl::domain::services::crawl_service::CrawlService;
use titlecrawl::domain::services::extraction_service::{Extractor, SelectorExtractor};
use titlecrawl::engines::reqwest_engine::ReqwestFetcher;
use titlecrawl::engines::traits::Fetcher;
use titlecrawl::presentation::routes;
use titlecrawl::server::shutdown::{ServerError, ShutdownSupervisor};
use titlecrawl::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.log.level)?;
    info!("Starting titlecrawl...");
    info!("Configuration loaded");

    // 3. Initialize components
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(&settings.crawler.user_agent)?);
    let service = Arc::new(CrawlService::from_settings(fetcher, &settings.crawler));
    let extractor: Arc<dyn Extractor> = Arc::new(SelectorExtractor::title());
    info!(
        "Crawler ready (fetch timeout {:?}, window {:?})",
        service.fetch_timeout(),
        service.window_timeout()
    );

    // 4. Start HTTP server
    let app = routes::routes(service, extractor);
    let supervisor = ShutdownSupervisor::new(settings.server.shutdown_timeout());

    match supervisor.run(&settings.server.address(), app).await {
        Ok(()) => info!("Crawler stopped"),
        Err(e @ ServerError::Bind { .. }) => return Err(e.into()),
        Err(e) => error!("Shutdown finished with error: {}", e),
    }

    Ok(())
}
