// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

/// 命令行参数
///
/// 所有参数都是可选的，未指定时使用配置文件、环境变量或默认值
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "titlecrawl",
    version,
    about = "Fetches a batch of URLs concurrently and returns their page titles"
)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", alias = "log_level")]
    pub log_level: Option<String>,

    /// Extra configuration file, loaded after the defaults
    #[arg(short, long)]
    pub config: Option<String>,
}
