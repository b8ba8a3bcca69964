// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 服务器生命周期模块
///
/// 负责监听、信号处理和优雅关闭
pub mod shutdown;
