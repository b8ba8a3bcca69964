// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：对外返回的解析结果
/// - 服务（services）：抓取编排和内容提取
///
/// 领域层只依赖抓取器接口，不依赖具体的HTTP实现。
pub mod models;
pub mod services;
