//! 输入代码
//!
//! 形如 `"<类型> <地区代码>"` 的原始字符串，必须恰好拆成两段

use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("输入格式无效: 期望 2 段, 实际 {tokens} 段")]
pub struct InputError {
    pub tokens: usize,
}

/// 已解析的输入条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    kind: String,
    region_code: String,
}

impl InputItem {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let mut tokens = raw.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(kind), Some(region_code), None) => Ok(Self {
                kind: kind.to_string(),
                region_code: region_code.to_string(),
            }),
            _ => Err(InputError {
                tokens: raw.split_whitespace().count(),
            }),
        }
    }

    /// 类型标识（第一段）
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// 地区代码（第二段）
    pub fn region_code(&self) -> &str {
        &self.region_code
    }
}

impl Display for InputItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.region_code)
    }
}
