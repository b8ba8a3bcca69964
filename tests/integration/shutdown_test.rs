// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{crawler_app, crawler_uri, start_site};
use axum::{routing::get, Router};
use std::time::Duration;
use titlecrawl::server::shutdown::{ServerError, ShutdownState, ShutdownSupervisor};

/// 取消后服务器停止，并不再接受新连接
#[tokio::test]
async fn cancellation_stops_the_server() {
    let listener = ShutdownSupervisor::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let supervisor = ShutdownSupervisor::new(Duration::from_secs(5));
    let handle = supervisor.shutdown_handle();
    let mut states = supervisor.subscribe();

    let app = crawler_app(Duration::from_secs(1), Duration::from_secs(1));
    let server = tokio::spawn(async move { supervisor.serve(listener, app).await });

    states
        .wait_for(|state| *state == ShutdownState::Serving)
        .await
        .unwrap();
    let body = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");

    handle.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop promptly")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(*states.borrow(), ShutdownState::Stopped);

    assert!(reqwest::get(format!("http://{}/health", addr)).await.is_err());
}

/// 关闭期间进行中的请求可以完成
#[tokio::test]
async fn in_flight_request_completes_during_shutdown() {
    let site = start_site().await;
    let listener = ShutdownSupervisor::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let supervisor = ShutdownSupervisor::new(Duration::from_secs(5));
    let handle = supervisor.shutdown_handle();

    // The window cancels the slow page at 300ms, before its 400ms fetch timeout
    let app = crawler_app(Duration::from_millis(400), Duration::from_millis(300));
    let server = tokio::spawn(async move { supervisor.serve(listener, app).await });

    let uri = crawler_uri(&[format!("{}/a", site), format!("{}/slow", site)]);
    let request = tokio::spawn(async move {
        reqwest::get(format!("http://{}{}", addr, uri))
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    let body = request.await.unwrap();
    let results: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["result"], "X");

    assert!(server.await.unwrap().is_ok());
}

/// 关闭超时被报告为错误
#[tokio::test]
async fn shutdown_timeout_is_reported() {
    let listener = ShutdownSupervisor::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let supervisor = ShutdownSupervisor::new(Duration::from_millis(200));
    let handle = supervisor.shutdown_handle();

    let app = Router::new().route(
        "/stuck",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "done"
        }),
    );
    let server = tokio::spawn(async move { supervisor.serve(listener, app).await });

    let _request = tokio::spawn(async move { reqwest::get(format!("http://{}/stuck", addr)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    let result = tokio::time::timeout(Duration::from_secs(3), server)
        .await
        .expect("supervisor should give up after its shutdown timeout")
        .unwrap();
    assert!(matches!(result, Err(ServerError::ShutdownTimeout(_))));
}
