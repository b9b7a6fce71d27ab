//! Date Format Classifier Module
//!
//! 書式ID・書式文字列が日付・時刻を表すかどうかを判定します。

use std::collections::HashMap;

use super::sections::split_sections;

/// ビルトイン書式IDの日付・時刻判定
///
/// Excelの標準書式IDのうち、判定が定まっているものの対応表です。
/// 0-13、37-44、48、49は数値・テキスト、14-22、45-47は日付・時刻です。
pub(crate) fn builtin_is_date(num_fmt_id: u32) -> Option<bool> {
    match num_fmt_id {
        0..=13 | 37..=44 | 48 | 49 => Some(false),
        14..=22 | 45..=47 => Some(true),
        _ => None,
    }
}

/// カスタム書式文字列が日付・時刻書式かどうかを判定
///
/// いずれかのセクションに日付・時刻トークンがあれば`true`を返します。
///
/// # 例
///
/// - `"yyyy-mm-dd"` → `true`
/// - `"[h]:mm"` → `true`
/// - `"0.00 \"days\""` → `false`
/// - `"[Red]0.00"` → `false`
pub(crate) fn classify_format_code(format_code: &str) -> bool {
    split_sections(format_code)
        .iter()
        .any(|section| section.is_datetime())
}

/// 書式IDから日付判定へのテーブル
///
/// ビルトインの対応表に、`styles.xml`の`numFmt`要素で定義されたカスタム書式を
/// マージしたものです。同じIDが複数回定義された場合は最初の定義を採用します。
#[derive(Debug, Clone, Default)]
pub(crate) struct FormatTable {
    custom: HashMap<u32, bool>,
}

impl FormatTable {
    /// 空のテーブルを生成（ビルトインのみ）
    pub fn new() -> Self {
        Self::default()
    }

    /// カスタム書式を登録
    ///
    /// # 戻り値
    ///
    /// 登録された書式の判定結果（既に登録済みの場合は既存の判定）
    pub fn insert_custom(&mut self, num_fmt_id: u32, format_code: &str) -> bool {
        *self
            .custom
            .entry(num_fmt_id)
            .or_insert_with(|| classify_format_code(format_code))
    }

    /// 書式IDが日付・時刻書式かどうかを判定
    ///
    /// カスタム定義が優先され、どちらにも存在しないIDは日付ではありません。
    pub fn is_date_format(&self, num_fmt_id: u32) -> bool {
        self.custom
            .get(&num_fmt_id)
            .copied()
            .or_else(|| builtin_is_date(num_fmt_id))
            .unwrap_or(false)
    }
}
