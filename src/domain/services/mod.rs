// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取服务（crawl_service）：为每个URL派发抓取+提取任务，并在收集窗口内汇总结果
/// - 提取服务（extraction_service）：可替换的提取器接口及默认的标题提取实现
pub mod crawl_service;
pub mod extraction_service;
