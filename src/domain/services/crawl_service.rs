// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::parsing_result::ParsingResult;
use crate::domain::services::extraction_service::{ExtractError, Extractor};
use crate::engines::traits::{FetchError, Fetcher};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// 单个URL处理流程的错误
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// 爬取服务
///
/// 为每个URL派发一个独立的抓取+提取任务，并在收集窗口内汇总结果。
/// 窗口关闭前未完成的URL不会出现在返回结果中。
#[derive(Clone)]
pub struct CrawlService {
    fetcher: Arc<dyn Fetcher>,
    fetch_timeout: Duration,
    window_timeout: Duration,
}

impl CrawlService {
    /// 创建爬取服务
    ///
    /// # 参数
    ///
    /// * `fetcher` - 抓取器
    /// * `fetch_timeout` - 单个URL抓取的超时时间
    /// * `window_timeout` - 结果收集窗口
    pub fn new(fetcher: Arc<dyn Fetcher>, fetch_timeout: Duration, window_timeout: Duration) -> Self {
        Self {
            fetcher,
            fetch_timeout,
            window_timeout,
        }
    }

    /// 从配置创建爬取服务
    pub fn from_settings(fetcher: Arc<dyn Fetcher>, settings: &CrawlerSettings) -> Self {
        Self::new(fetcher, settings.fetch_timeout(), settings.window_timeout())
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn window_timeout(&self) -> Duration {
        self.window_timeout
    }

    /// 处理单个URL：先抓取，成功后再提取
    ///
    /// 抓取被 `fetch_timeout` 限制，即使抓取器本身忽略了超时参数
    pub async fn parse(&self, url: &str, extractor: &dyn Extractor) -> Result<String, CrawlError> {
        run_pipeline(self.fetcher.as_ref(), extractor, url, self.fetch_timeout).await
    }

    /// 汇总多个URL的解析结果
    ///
    /// `urls` 应已去重并移除空字符串（见 `filter_urls`）。
    /// 返回顺序为完成顺序。收集窗口关闭后仍会等待所有任务结束再返回，
    /// 迟到的结果被丢弃。
    ///
    /// # 参数
    ///
    /// * `urls` - 去重后的URL列表
    /// * `extractor` - 提取器
    ///
    /// # 返回值
    ///
    /// 窗口内完成的解析结果
    pub async fn aggregate(
        &self,
        urls: Vec<String>,
        extractor: Arc<dyn Extractor>,
    ) -> Vec<ParsingResult> {
        let dispatched = urls.len();
        if dispatched == 0 {
            return Vec::new();
        }

        // Capacity covers every task so a late send never blocks
        let (tx, mut rx) = mpsc::channel::<ParsingResult>(dispatched);
        let mut handles = Vec::with_capacity(dispatched);

        for url in urls {
            let tx = tx.clone();
            let fetcher = self.fetcher.clone();
            let extractor = extractor.clone();
            let fetch_timeout = self.fetch_timeout;

            handles.push(tokio::spawn(async move {
                let result =
                    crawl_worker(fetcher.as_ref(), extractor.as_ref(), url, fetch_timeout).await;
                if tx.send(result).await.is_err() {
                    debug!("Result channel closed before worker could report");
                }
            }));
        }
        drop(tx);

        let started = Instant::now();
        let deadline = tokio::time::sleep(self.window_timeout);
        tokio::pin!(deadline);

        let mut results = Vec::with_capacity(dispatched);
        let mut window_closed = false;
        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => {
                    warn!(
                        "Collection window of {:?} elapsed with {}/{} results",
                        self.window_timeout,
                        results.len(),
                        dispatched
                    );
                    window_closed = true;
                    break;
                }
                received = rx.recv() => match received {
                    Some(result) => {
                        results.push(result);
                        if results.len() == dispatched {
                            break;
                        }
                    }
                    // Every sender is gone, only possible if workers panicked
                    None => break,
                },
            }
        }

        let collected_in = started.elapsed();

        // Stragglers are cancelled so the request never outlives its window
        if window_closed {
            for handle in handles.iter().filter(|h| !h.is_finished()) {
                handle.abort();
            }
        }

        for outcome in join_all(handles).await {
            match outcome {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => debug!("Crawl worker cancelled after window closed"),
                Err(e) => error!("Crawl worker failed to complete: {}", e),
            }
        }
        drop(rx);

        info!(
            "Collected {}/{} results in {}ms",
            results.len(),
            dispatched,
            collected_in.as_millis()
        );

        results
    }
}

/// 单个URL的完整处理流程，总是产生一条结果
async fn crawl_worker(
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    url: String,
    fetch_timeout: Duration,
) -> ParsingResult {
    match run_pipeline(fetcher, extractor, &url, fetch_timeout).await {
        Ok(value) => ParsingResult::success(url, value),
        Err(e) => {
            debug!("Parsing error for {} via {}: {}", url, fetcher.name(), e);
            ParsingResult::failure(url, &e)
        }
    }
}

async fn run_pipeline(
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    url: &str,
    fetch_timeout: Duration,
) -> Result<String, CrawlError> {
    let fetched = tokio::time::timeout(fetch_timeout, fetcher.fetch(url, fetch_timeout))
        .await
        .map_err(|_| FetchError::Timeout(fetch_timeout))??;

    Ok(extractor.extract(&fetched.content)?)
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
