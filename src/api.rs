//! Public API Types
//!
//! 公開APIで使用する列挙型とトレイトを定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::error::XlsxReaderError;
use crate::types::{column_name_to_number, CellAddress};

/// 逐次読み込み時の空セルの扱い
///
/// `SheetReader::read_next()`と`SheetReader::read_next_in_row()`が
/// どの空セルを返すかを指定します。カーソルごとに最初の読み込み前に設定し、
/// 以降は変更できません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NullPolicy {
    /// 次の非nullセルまで読み進める（デフォルト）
    #[default]
    SkipNulls,

    /// XML上に存在するセル要素はnullでもすべて返すが、セル要素のない行は読み飛ばす
    ReadNullsOnPopulatedRows,

    /// ディメンション内のすべてのアドレスを行優先順に返す
    ///
    /// XMLに存在しないアドレスには`CellValue::Null`を合成します。
    ReadAllNulls,
}

/// シリアル値の日付システム
///
/// `xl/workbook.xml`の`<workbookPr date1904="1"/>`で1904年システムが選択されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    /// 1900年システム（1899-12-30起算、デフォルト）
    #[default]
    V1900,

    /// 1904年システム（1904-01-01起算）
    V1904,
}

/// セル参照として使用できる型
///
/// `SheetReader`の各メソッドは、以下のいずれの形式でもアドレスを受け付けます。
///
/// - `"C3"`（A1記法の文字列）
/// - `CellAddress`
/// - `(3, 1)`（行番号, 列番号）
/// - `("A", 3)`（列名, 行番号）
///
/// ```rust
/// use xlsxcursor::{CellAddress, ToCellAddress};
///
/// let a3 = CellAddress::parse("A3").unwrap();
/// assert_eq!((3u32, 1u32).to_cell_address().unwrap(), a3);
/// assert_eq!(("A", 3u32).to_cell_address().unwrap(), a3);
/// ```
pub trait ToCellAddress {
    /// `CellAddress`に変換
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError>;
}

impl ToCellAddress for CellAddress {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        Ok(*self)
    }
}

impl ToCellAddress for &CellAddress {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        Ok(**self)
    }
}

impl ToCellAddress for &str {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        CellAddress::parse(self)
    }
}

impl ToCellAddress for String {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        CellAddress::parse(self)
    }
}

impl ToCellAddress for &String {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        CellAddress::parse(self)
    }
}

impl ToCellAddress for (u32, u32) {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        CellAddress::new(self.0, self.1)
    }
}

impl ToCellAddress for (&str, u32) {
    fn to_cell_address(&self) -> Result<CellAddress, XlsxReaderError> {
        CellAddress::new(self.1, column_name_to_number(self.0)?)
    }
}
