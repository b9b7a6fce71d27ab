//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxcursorクレート全体で使用するエラー型
///
/// ワークブックのオープン、シートの探索、セル値のデコード中に発生する
/// すべてのエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - `MalformedAddress`: セル参照文字列が「列文字 + 行番号」の文法に合致しない
/// - `SheetNotFound` / `SheetIndexNotFound`: 指定されたシートが存在しない
/// - `OutOfRange`: アドレスや行・列番号がワークシートのディメンション外
/// - `KeyNotFound`: 遅延インデックスの元ストリームが要求IDに到達する前に終端した
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcursor::{ExcelReader, XlsxReaderError};
///
/// fn read_a1(path: &str) -> Result<(), XlsxReaderError> {
///     let mut workbook = ExcelReader::open(path)?; // Ioエラーは自動的に変換される
///     let sheet = workbook.sheet("Sheet1")?;
///     println!("{}", sheet.get("A1")?);
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxReaderError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8文字列の変換エラー
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// 属性値（行番号、スタイルIDなど）の整数解析エラー
    #[error("Number parse error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// XMLの解析エラー（quick-xml由来）
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIPアーカイブの解析エラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// XLSXとして必要なエントリが欠落している
    #[error("Invalid workbook: {0}")]
    InvalidFormat(String),

    /// セル参照文字列が不正
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsxcursor::{CellAddress, XlsxReaderError};
    ///
    /// match CellAddress::parse("1A") {
    ///     Err(XlsxReaderError::MalformedAddress(text)) => assert_eq!(text, "1A"),
    ///     _ => unreachable!(),
    /// }
    /// ```
    #[error("Malformed cell address: '{0}'")]
    MalformedAddress(String),

    /// 名前で指定されたシートが存在しない
    #[error("Sheet with name '{0}' was not found in the workbook")]
    SheetNotFound(String),

    /// インデックスで指定されたシートが存在しない
    #[error("Sheet with zero-based index {index} not found in the workbook. Workbook contains {count} sheets")]
    SheetIndexNotFound {
        /// 要求されたインデックス（0始まり）
        index: usize,
        /// ワークブック内のシート数
        count: usize,
    },

    /// ワークシートのディメンション外へのアクセス
    ///
    /// `SheetReader::dimension()`を先に確認することで回避できます。
    #[error("{requested} is outside the worksheet dimension {dimension}")]
    OutOfRange {
        /// 要求されたアドレス・行・列の説明
        requested: String,
        /// ワークシートのディメンション（例: "A1:K3"）
        dimension: String,
    },

    /// 遅延インデックスの元ストリームが要求IDより前に終端した
    #[error("The key '{key}' was not found in the {index}")]
    KeyNotFound {
        /// インデックスの種類（"shared string table"など）
        index: &'static str,
        /// 要求されたID
        key: usize,
    },

    /// セル値のデコードに失敗した
    #[error("Invalid value in cell {address}: {message}")]
    InvalidCellValue {
        /// セル参照（A1記法）
        address: String,
        /// 詳細メッセージ
        message: String,
    },

    /// 設定の検証に失敗したエラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃、パストラバーサル攻撃、ファイルサイズ制限などの
    /// セキュリティ制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl XlsxReaderError {
    /// XML属性のエラーを変換
    pub(crate) fn attr(err: quick_xml::events::attributes::AttrError) -> Self {
        XlsxReaderError::Xml(quick_xml::Error::from(err))
    }
}
