//! Format Module
//!
//! Number Format Stringの構文解析と、日付・時刻書式の判定を提供します。

mod classifier;
mod sections;
mod tokens;

pub(crate) use classifier::FormatTable;
