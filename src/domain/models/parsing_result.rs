// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 单个URL的解析结果
///
/// `success == true` 当且仅当 `error` 为空字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingResult {
    /// 目标URL
    pub url: String,
    /// 提取到的值
    #[serde(rename = "result")]
    pub extracted_value: String,
    /// 抓取和提取是否全部成功
    #[serde(rename = "status")]
    pub success: bool,
    /// 失败时的错误描述
    #[serde(rename = "error")]
    pub error_message: String,
}

impl ParsingResult {
    /// 构造成功结果
    pub fn success(url: impl Into<String>, extracted_value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extracted_value: extracted_value.into(),
            success: true,
            error_message: String::new(),
        }
    }

    /// 构造失败结果
    pub fn failure(url: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self {
            url: url.into(),
            extracted_value: String::new(),
            success: false,
            error_message: error.to_string(),
        }
    }
}
