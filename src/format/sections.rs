//! FormatSection Module
//!
//! Number Format Stringのセクション分割を提供します。

use super::tokens::{tokenize, FormatToken};

/// フォーマットのセクション
///
/// Number Format Stringは`;`で最大4つのセクション（正数、負数、ゼロ、テキスト）に
/// 分割されます。日付判定ではどのセクションも同等に扱うため、種類は保持しません。
#[derive(Debug, Clone)]
pub(crate) struct FormatSection {
    /// フォーマットトークン
    pub tokens: Vec<FormatToken>,
}

impl FormatSection {
    /// セクション文字列を解析
    pub fn parse(section: &str) -> Self {
        Self {
            tokens: tokenize(section),
        }
    }

    /// セクションが日付・時刻書式かどうかを判定
    pub fn is_datetime(&self) -> bool {
        self.tokens.iter().any(|t| t.is_datetime())
    }
}

/// 書式文字列をセクションに分割して解析
///
/// 引用符、角括弧の内側およびエスケープされた`;`は区切りとして扱いません。
pub(crate) fn split_sections(format_code: &str) -> Vec<FormatSection> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for ch in format_code.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
            continue;
        }
        match ch {
            '\\' | '_' | '*' if !in_quotes && !in_brackets => {
                escaped = true;
                current.push(ch);
            }
            '"' if !in_brackets => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '[' if !in_quotes => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if !in_quotes => {
                in_brackets = false;
                current.push(ch);
            }
            ';' if !in_quotes && !in_brackets => {
                sections.push(FormatSection::parse(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() || sections.is_empty() {
        sections.push(FormatSection::parse(&current));
    }

    sections
}
