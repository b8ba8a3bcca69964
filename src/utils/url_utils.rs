// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// 过滤URL列表
///
/// 移除空字符串并按精确字符串比较去重，保留首次出现的顺序。
/// 结果恰好包含输入中所有不同的非空URL。
pub fn filter_urls<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let urls = urls.into_iter();
    let (lower, _) = urls.size_hint();
    let mut seen = HashSet::with_capacity(lower);
    let mut unique = Vec::with_capacity(lower);

    for url in urls {
        if url.is_empty() {
            continue;
        }
        if seen.insert(url.clone()) {
            unique.push(url);
        }
    }

    unique
}
