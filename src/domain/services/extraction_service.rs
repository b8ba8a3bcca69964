// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use thiserror::Error;

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractError {
    /// CSS选择器无效
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// 文档无法解析
    #[error("failed to parse document: {0}")]
    Parse(String),
}

/// 提取器特质
///
/// 将抓取到的原始字节转换为单个字符串值。编排逻辑只依赖这个接口，
/// 可以替换为任意实现而不影响抓取流程。
pub trait Extractor: Send + Sync {
    /// 从内容中提取值
    fn extract(&self, content: &[u8]) -> Result<String, ExtractError>;
}

impl<F> Extractor for F
where
    F: Fn(&[u8]) -> Result<String, ExtractError> + Send + Sync,
{
    fn extract(&self, content: &[u8]) -> Result<String, ExtractError> {
        self(content)
    }
}

/// 基于CSS选择器的提取器
///
/// 使用容错的HTML解析器（html5ever），返回文档顺序中第一个匹配元素的文本，
/// 没有匹配元素时返回空字符串而不是错误
#[derive(Debug, Clone)]
pub struct SelectorExtractor {
    selector: Selector,
    attr: Option<String>,
}

impl SelectorExtractor {
    /// 创建提取器
    ///
    /// # 参数
    ///
    /// * `selector` - CSS选择器
    ///
    /// # 返回值
    ///
    /// * `Ok(SelectorExtractor)` - 提取器
    /// * `Err(ExtractError)` - 选择器无效
    pub fn new(selector: &str) -> Result<Self, ExtractError> {
        let parsed = Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })?;

        Ok(Self {
            selector: parsed,
            attr: None,
        })
    }

    /// 页面标题提取器
    pub fn title() -> Self {
        Self {
            selector: Selector::parse("title").expect("static selector is valid"),
            attr: None,
        }
    }

    /// 改为提取匹配元素的属性值
    pub fn with_attribute(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }
}

impl Default for SelectorExtractor {
    fn default() -> Self {
        Self::title()
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractError> {
        let html = String::from_utf8_lossy(content);
        let document = Html::parse_document(&html);

        let Some(element) = document.select(&self.selector).next() else {
            return Ok(String::new());
        };

        let value = match &self.attr {
            Some(attr) => element.value().attr(attr).unwrap_or_default().to_string(),
            None => element.text().collect::<String>(),
        };

        Ok(value)
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
