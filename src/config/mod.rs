// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 命令行参数模块
pub mod cli;

/// 配置模块
///
/// 处理应用程序的配置设置，包括服务器、抓取超时和日志级别
pub mod settings;
