//! Types Module
//!
//! クレート全体で使用する共通データ型（セル参照、ディメンション、セル値）を定義するモジュール。

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::XlsxReaderError;

/// A1記法の文法（列文字 + 先頭ゼロなしの行番号）
static ADDRESS_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+)([1-9][0-9]*)$").expect("address grammar is a valid regex")
});

/// セル参照（行・列とも1始まり）
///
/// 比較順序は行優先（行の昇順、次に列の昇順）です。
///
/// # 使用例
///
/// ```rust
/// use xlsxcursor::CellAddress;
///
/// let c3 = CellAddress::parse("C3").unwrap();
/// assert_eq!((c3.row(), c3.column()), (3, 3));
/// assert_eq!(c3.to_string(), "C3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellAddress {
    // フィールド順は行優先の Ord に合わせている
    row: u32,
    column: u32,
}

impl CellAddress {
    /// 行番号・列番号から生成
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellAddress)` - 行・列ともに1以上の場合
    /// * `Err(XlsxReaderError::MalformedAddress)` - いずれかが0の場合
    pub fn new(row: u32, column: u32) -> Result<Self, XlsxReaderError> {
        if row == 0 || column == 0 {
            return Err(XlsxReaderError::MalformedAddress(format!(
                "row {}, column {}",
                row, column
            )));
        }
        Ok(Self { row, column })
    }

    /// A1記法の文字列を解析
    ///
    /// 列は大文字のみ、行番号は先頭ゼロを許可しません（`format`との全単射を保つため）。
    pub fn parse(text: &str) -> Result<Self, XlsxReaderError> {
        let malformed = || XlsxReaderError::MalformedAddress(text.to_string());
        let captures = ADDRESS_GRAMMAR.captures(text).ok_or_else(malformed)?;

        let column = column_name_to_number(&captures[1]).map_err(|_| malformed())?;
        let row: u32 = captures[2].parse().map_err(|_| malformed())?;

        Ok(Self { row, column })
    }

    /// 行番号（1始まり）
    pub fn row(&self) -> u32 {
        self.row
    }

    /// 列番号（1始まり）
    pub fn column(&self) -> u32 {
        self.column
    }

    /// 列名（例: "AA"）
    pub fn column_name(&self) -> String {
        number_to_column_name(self.column)
    }

    /// A1記法の文字列に変換
    pub fn format(&self) -> String {
        format!("{}{}", number_to_column_name(self.column), self.row)
    }

    /// 右方向へ平行移動（ディメンションの範囲チェックなし）
    ///
    /// 列番号は`u32::MAX`で飽和します。
    pub fn add_columns(&self, n: u32) -> Self {
        Self {
            row: self.row,
            column: self.column.saturating_add(n),
        }
    }

    /// 下方向へ平行移動（ディメンションの範囲チェックなし）
    ///
    /// 行番号は`u32::MAX`で飽和します。
    pub fn add_rows(&self, n: u32) -> Self {
        Self {
            row: self.row.saturating_add(n),
            column: self.column,
        }
    }

    /// 左上・右下を指定して範囲を生成
    pub fn range(top_left: CellAddress, bottom_right: CellAddress) -> CellRange {
        CellRange::new(top_left, bottom_right)
    }

    /// `other`が行優先順で直前のセルかどうかを判定
    ///
    /// 同じ行で1列左、または`other`が前の行の最右列（`rightmost_column`）で
    /// 自身が次の行の1列目の場合に`true`を返します。
    pub fn is_next_adjacent_to(&self, other: &CellAddress, rightmost_column: u32) -> bool {
        if self.row == other.row && other.column.checked_add(1) == Some(self.column) {
            return true;
        }
        other.row.checked_add(1) == Some(self.row)
            && self.column == 1
            && other.column == rightmost_column
    }

    /// 列の帯（`first_column`〜`last_column`）内での行優先の次のセル
    ///
    /// 最終行（`u32::MAX`）の最右列では`None`を返します。
    pub(crate) fn next_adjacent(&self, first_column: u32, last_column: u32) -> Option<Self> {
        if self.column >= last_column {
            Some(Self {
                row: self.row.checked_add(1)?,
                column: first_column,
            })
        } else {
            Some(Self {
                row: self.row,
                column: self.column + 1,
            })
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", number_to_column_name(self.column), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = XlsxReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CellAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        CellAddress::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// 列名を列番号に変換（"A" -> 1, "Z" -> 26, "AA" -> 27）
///
/// 大文字・小文字を区別しません。
pub fn column_name_to_number(letters: &str) -> Result<u32, XlsxReaderError> {
    let malformed = || XlsxReaderError::MalformedAddress(letters.to_string());
    if letters.is_empty() {
        return Err(malformed());
    }

    letters.chars().try_fold(0u32, |acc, ch| {
        if !ch.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let digit = (ch.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(malformed)
    })
}

/// 列番号を列名に変換（1 -> "A", 26 -> "Z", 27 -> "AA"）
///
/// 0の場合は空文字列を返します。
pub fn number_to_column_name(mut n: u32) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        let modulo = (n - 1) % 26;
        letters.push(b'A' + modulo as u8);
        n = (n - modulo - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// セル範囲（左上〜右下、両端を含む）
///
/// 反復するたびに角の座標から再計算されるため、何度でも列挙し直せます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    top_left: CellAddress,
    bottom_right: CellAddress,
}

impl CellRange {
    /// 新しい範囲を生成
    pub fn new(top_left: CellAddress, bottom_right: CellAddress) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// 左上のセル
    pub fn top_left(&self) -> CellAddress {
        self.top_left
    }

    /// 右下のセル
    pub fn bottom_right(&self) -> CellAddress {
        self.bottom_right
    }

    /// 範囲が空（左上が右下を越えている）かどうか
    pub fn is_empty(&self) -> bool {
        self.top_left.row > self.bottom_right.row || self.top_left.column > self.bottom_right.column
    }

    /// 範囲内のセル数（行数 × 列数）
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let rows = (self.bottom_right.row - self.top_left.row + 1) as usize;
        let columns = (self.bottom_right.column - self.top_left.column + 1) as usize;
        rows * columns
    }

    /// 指定されたセルが範囲内にあるかを判定
    pub fn contains(&self, address: &CellAddress) -> bool {
        address.row >= self.top_left.row
            && address.row <= self.bottom_right.row
            && address.column >= self.top_left.column
            && address.column <= self.bottom_right.column
    }

    /// 行優先順でセルを列挙
    pub fn iter(&self) -> CellRangeIter {
        CellRangeIter {
            range: *self,
            next: if self.is_empty() {
                None
            } else {
                Some(self.top_left)
            },
        }
    }
}

impl IntoIterator for CellRange {
    type Item = CellAddress;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.top_left, self.bottom_right)
    }
}

/// `CellRange`のイテレーター
#[derive(Debug, Clone)]
pub struct CellRangeIter {
    range: CellRange,
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIter {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .next_adjacent(self.range.top_left.column, self.range.bottom_right.column)
            .filter(|following| following.row <= self.range.bottom_right.row);
        Some(current)
    }
}

/// ワークシートのディメンション（使用範囲）
///
/// シートを開いた時点で一度だけ読み込まれ、有効なアドレスの範囲を定義します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetDimension {
    /// 左上のセル
    pub top_left: CellAddress,
    /// 右下のセル
    pub bottom_right: CellAddress,
}

impl WorksheetDimension {
    /// `ref`属性（例: "A1:K3"、"A1"）を解析
    pub fn parse(reference: &str) -> Result<Self, XlsxReaderError> {
        let (top_left, bottom_right) = match reference.split_once(':') {
            Some((first, last)) => (CellAddress::parse(first)?, CellAddress::parse(last)?),
            None => {
                let single = CellAddress::parse(reference)?;
                (single, single)
            }
        };
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// 範囲として取得
    pub fn range(&self) -> CellRange {
        CellRange::new(self.top_left, self.bottom_right)
    }

    /// 指定されたセルがディメンション内にあるかを判定
    pub fn contains(&self, address: &CellAddress) -> bool {
        self.range().contains(address)
    }

    /// 最小行番号
    pub fn min_row(&self) -> u32 {
        self.top_left.row
    }

    /// 最大行番号
    pub fn max_row(&self) -> u32 {
        self.bottom_right.row
    }

    /// 最小列番号
    pub fn min_column(&self) -> u32 {
        self.top_left.column
    }

    /// 最大列番号
    pub fn max_column(&self) -> u32 {
        self.bottom_right.column
    }
}

impl Default for WorksheetDimension {
    /// ディメンション宣言がない場合は左上の1セルのみ
    fn default() -> Self {
        let a1 = CellAddress { row: 1, column: 1 };
        Self {
            top_left: a1,
            bottom_right: a1,
        }
    }
}

impl fmt::Display for WorksheetDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top_left == self.bottom_right {
            write!(f, "{}", self.top_left)
        } else {
            write!(f, "{}:{}", self.top_left, self.bottom_right)
        }
    }
}

/// セルの値を表す列挙型
///
/// 数式のエラー値（例: `#DIV/0!`）は`Text`として保持されます。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// 空セル
    #[default]
    Null,

    /// 数値（f64）
    Number(f64),

    /// 文字列
    Text(String),

    /// 論理値
    Boolean(bool),

    /// 日付・時刻
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// 数値の場合はその値
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 文字列の場合はその参照
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 論理値の場合はその値
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// 日付・時刻の場合はその値
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}
