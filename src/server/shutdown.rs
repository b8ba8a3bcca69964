// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Router;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 服务器生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// 尚未开始监听
    Starting,
    /// 正在接受连接
    Serving,
    /// 已停止接受新连接，等待已有连接结束
    ShuttingDown,
    /// 已停止
    Stopped,
}

impl std::fmt::Display for ShutdownState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownState::Starting => write!(f, "starting"),
            ShutdownState::Serving => write!(f, "serving"),
            ShutdownState::ShuttingDown => write!(f, "shutting_down"),
            ShutdownState::Stopped => write!(f, "stopped"),
        }
    }
}

/// 服务器错误类型
#[derive(Error, Debug)]
pub enum ServerError {
    /// 监听地址绑定失败，启动中止
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// 服务过程中出现致命错误
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
    /// 优雅关闭未能在限定时间内完成
    #[error("graceful shutdown did not complete within {0:?}")]
    ShutdownTimeout(Duration),
}

/// 关闭监督器
///
/// 启动监听并等待系统信号、外部取消或服务器故障中的任意一个，
/// 然后停止接受新连接，并在限定时间内等待已有请求完成。
pub struct ShutdownSupervisor {
    token: CancellationToken,
    state_tx: watch::Sender<ShutdownState>,
    shutdown_timeout: Duration,
}

impl ShutdownSupervisor {
    /// 创建监督器
    ///
    /// # 参数
    ///
    /// * `shutdown_timeout` - 取消后等待已有连接结束的最长时间
    pub fn new(shutdown_timeout: Duration) -> Self {
        let (state_tx, _) = watch::channel(ShutdownState::Starting);
        Self {
            token: CancellationToken::new(),
            state_tx,
            shutdown_timeout,
        }
    }

    /// 取消令牌，取消后触发关闭
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<ShutdownState> {
        self.state_tx.subscribe()
    }

    /// 当前状态
    pub fn state(&self) -> ShutdownState {
        *self.state_tx.borrow()
    }

    fn set_state(&self, state: ShutdownState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            info!("Server state: {} -> {}", previous, state);
        }
    }

    /// 绑定监听地址
    pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })
    }

    /// 绑定地址并运行服务器直到关闭
    pub async fn run(&self, addr: &str, app: Router) -> Result<(), ServerError> {
        let listener = match Self::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                self.set_state(ShutdownState::Stopped);
                return Err(e);
            }
        };
        self.serve(listener, app).await
    }

    /// 在已绑定的监听器上运行服务器直到关闭
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 服务器已正常停止
    /// * `Err(ServerError)` - 服务器故障，或关闭超时
    pub async fn serve(&self, listener: TcpListener, app: Router) -> Result<(), ServerError> {
        match listener.local_addr() {
            Ok(addr) => info!("Server listening on {}", addr),
            Err(e) => warn!("Server listening on unknown address: {}", e),
        }
        self.set_state(ShutdownState::Serving);

        let stop = self.token.clone();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(stop.cancelled_owned())
                .await
        });

        let exited_early = tokio::select! {
            _ = wait_for_signal() => {
                info!("Received shutdown signal");
                None
            }
            _ = self.token.cancelled() => {
                info!("Shutdown requested");
                None
            }
            joined = &mut server => Some(joined),
        };

        // Every trigger converges on the same token, which stops the accept loop
        self.token.cancel();
        self.set_state(ShutdownState::ShuttingDown);

        let joined = match exited_early {
            Some(joined) => joined,
            None => match tokio::time::timeout(self.shutdown_timeout, &mut server).await {
                Ok(joined) => joined,
                Err(_) => {
                    server.abort();
                    self.set_state(ShutdownState::Stopped);
                    error!(
                        "Graceful shutdown did not finish within {:?}",
                        self.shutdown_timeout
                    );
                    return Err(ServerError::ShutdownTimeout(self.shutdown_timeout));
                }
            },
        };

        self.set_state(ShutdownState::Stopped);

        match joined {
            Ok(Ok(())) => {
                info!("Server stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Server error: {}", e);
                Err(ServerError::Serve(e))
            }
            Err(e) => {
                error!("Server task failed: {}", e);
                Err(ServerError::Serve(std::io::Error::other(e.to_string())))
            }
        }
    }
}

/// 等待 Ctrl+C 或 SIGTERM
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
