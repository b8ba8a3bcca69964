// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 解析结果（parsing_result）：每个被接受的URL对应一条结果，
/// 是接口对外返回的唯一数据单元
pub mod parsing_result;
