// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理命令行参数、配置文件和环境变量
pub mod config;

/// 领域模块
///
/// 包含解析结果模型、提取器接口和抓取编排服务
pub mod domain;

/// 引擎模块
///
/// 抓取器接口及基于reqwest的实现
pub mod engines;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 服务器模块
///
/// 监听和优雅关闭
pub mod server;

/// 工具模块
///
/// 提供日志初始化和URL过滤等辅助功能
pub mod utils;
