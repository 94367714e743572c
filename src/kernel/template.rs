//! `%(name)s` 模板渲染：用于文档 URL 与命令参数
//!
//! 支持的占位符：
//! - `%(query)s`: 查询词（已拼接 prefix/suffix），原样替换，不做 URL 转义
//! - `%(scope)s`: 提取后的 scope 名
//! - `%%`: 字面量 `%`

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder `%({0})s`")]
    UnknownKey(String),
    #[error("unsupported format sequence at byte {0}")]
    BadSequence(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub query: &'a str,
    pub scope: &'a str,
}

impl<'a> TemplateVars<'a> {
    pub fn new(query: &'a str, scope: &'a str) -> Self {
        Self { query, scope }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        match key {
            "query" => Some(self.query),
            "scope" => Some(self.scope),
            _ => None,
        }
    }
}

pub fn render(template: &str, vars: TemplateVars<'_>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + vars.query.len());
    let mut rest = template;
    let mut offset = 0usize;

    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx + 1..];

        let consumed = if tail.starts_with('%') {
            out.push('%');
            idx + 2
        } else if let Some(inner) = tail.strip_prefix('(') {
            let close = inner
                .find(')')
                .ok_or(TemplateError::BadSequence(offset + idx))?;
            if !inner[close + 1..].starts_with('s') {
                return Err(TemplateError::BadSequence(offset + idx));
            }
            let key = &inner[..close];
            let value = vars
                .get(key)
                .ok_or_else(|| TemplateError::UnknownKey(key.to_string()))?;
            out.push_str(value);
            // '%' + '(' + key + ')' + 's'
            idx + close + 4
        } else {
            return Err(TemplateError::BadSequence(offset + idx));
        };

        rest = &rest[consumed..];
        offset += consumed;
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/template.rs"]
mod tests;
