// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{body_string, crawler_app, crawler_uri, get_request, start_site};
use axum::http::{header, StatusCode};
use std::time::{Duration, Instant};
use titlecrawl::domain::models::parsing_result::ParsingResult;
use tower::util::ServiceExt;

const FETCH_TIMEOUT: Duration = Duration::from_secs(2);
const WINDOW: Duration = Duration::from_secs(2);

/// 缺少url参数时返回文本提示
#[tokio::test]
async fn missing_url_param_returns_plain_message() {
    let app = crawler_app(FETCH_TIMEOUT, WINDOW);

    let response = app.oneshot(get_request("/crawler")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_string(response).await, "Query param 'url' is missing");
}

#[tokio::test]
async fn empty_first_url_is_treated_as_missing() {
    let app = crawler_app(FETCH_TIMEOUT, WINDOW);

    let response = app
        .oneshot(get_request("/crawler?url=&url=http://127.0.0.1:1/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Query param 'url' is missing");
}

/// 重复的URL只抓取一次，结果为JSON数组
#[tokio::test]
async fn duplicate_urls_are_crawled_once() {
    let site = start_site().await;
    let a = format!("{}/a", site);
    let b = format!("{}/b", site);
    let app = crawler_app(FETCH_TIMEOUT, WINDOW);

    let response = app
        .oneshot(get_request(&crawler_uri(&[a.clone(), a.clone(), b.clone()])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "application/json"
    );

    let results: Vec<ParsingResult> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.success);
        assert_eq!(result.error_message, "");
        let expected = if result.url == a { "X" } else { "Y" };
        assert_eq!(result.extracted_value, expected);
    }
}

/// 响应使用约定的字段名
#[tokio::test]
async fn response_uses_wire_field_names() {
    let site = start_site().await;
    let app = crawler_app(FETCH_TIMEOUT, WINDOW);

    let response = app
        .oneshot(get_request(&crawler_uri(&[format!("{}/a", site)])))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let entry = &value[0];
    assert_eq!(entry["url"], format!("{}/a", site));
    assert_eq!(entry["result"], "X");
    assert_eq!(entry["status"], true);
    assert_eq!(entry["error"], "");
}

/// 单个URL失败不影响其他URL，状态码始终为200
#[tokio::test]
async fn per_url_failures_are_reported_inline() {
    let site = start_site().await;
    let ok = format!("{}/a", site);
    let missing = format!("{}/missing", site);
    let notitle = format!("{}/notitle", site);
    let app = crawler_app(FETCH_TIMEOUT, WINDOW);

    let response = app
        .oneshot(get_request(&crawler_uri(&[ok.clone(), missing.clone(), notitle.clone()])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let results: Vec<ParsingResult> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(results.len(), 3);

    let find = |url: &str| results.iter().find(|r| r.url == url).unwrap();
    assert!(find(&ok).success);

    let failed = find(&missing);
    assert!(!failed.success);
    assert_eq!(failed.extracted_value, "");
    assert_eq!(failed.error_message, "request error with status 404 Not Found");

    let untitled = find(&notitle);
    assert!(untitled.success);
    assert_eq!(untitled.extracted_value, "");
}

/// 窗口关闭时仍未完成的URL被静默丢弃
#[tokio::test]
async fn slow_url_is_dropped_from_response() {
    let site = start_site().await;
    let fast = format!("{}/a", site);
    let slow = format!("{}/slow", site);
    let app = crawler_app(Duration::from_millis(1_000), Duration::from_millis(300));

    let started = Instant::now();
    let response = app
        .oneshot(get_request(&crawler_uri(&[slow.clone(), fast.clone()])))
        .await
        .unwrap();
    let results: Vec<ParsingResult> = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, fast);
    // The straggler is cancelled when the 300ms window closes, long before its fetch timeout
    assert!(started.elapsed() < Duration::from_millis(900));
}

#[tokio::test]
async fn nothing_finished_in_window_yields_empty_array() {
    let site = start_site().await;
    let app = crawler_app(Duration::from_millis(500), Duration::from_millis(200));

    let response = app
        .oneshot(get_request(&crawler_uri(&[format!("{}/slow", site)])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "[]");
}
