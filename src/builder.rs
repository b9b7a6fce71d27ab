//! Builder Module
//!
//! Fluent Builder APIを提供し、設定済みの`ExcelReader`を段階的に構築する。

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::api::NullPolicy;
use crate::error::XlsxReaderError;
use crate::parser::ExcelReader;
use crate::security::SecurityConfig;

/// ワークブック読み込みの設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// 生成されるカーソルの初期の空セルの扱い
    pub null_policy: NullPolicy,

    /// アーカイブの制限
    pub security: SecurityConfig,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcursor::{NullPolicy, ReaderBuilder};
///
/// # fn main() -> Result<(), xlsxcursor::XlsxReaderError> {
/// let mut workbook = ReaderBuilder::new()
///     .with_null_policy(NullPolicy::ReadAllNulls)
///     .with_max_entry_size(16 * 1024 * 1024)
///     .open_path("report.xlsx")?;
/// let sheet = workbook.sheet_at(0)?;
/// while sheet.read_next()? {
///     println!("{:?}", sheet.value());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    /// 内部設定（構築中）
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 空セルの扱い: `NullPolicy::SkipNulls`
    /// - エントリ数の上限: 10,000
    /// - 単一エントリの展開サイズの上限: 100MB
    /// - 展開サイズの合計の上限: 1GB
    pub fn new() -> Self {
        Self::default()
    }

    /// カーソルの初期の空セルの扱いを指定する
    ///
    /// 個々のカーソルで`SheetReader::set_null_policy()`を呼び出して上書きできます。
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.config.null_policy = policy;
        self
    }

    /// 単一エントリの展開サイズの上限（バイト）を指定する
    pub fn with_max_entry_size(mut self, bytes: u64) -> Self {
        self.config.security.max_file_size = bytes;
        self
    }

    /// アーカイブ内のエントリ数の上限を指定する
    pub fn with_max_file_count(mut self, count: usize) -> Self {
        self.config.security.max_file_count = count;
        self
    }

    /// 展開サイズの合計の上限（バイト）を指定する
    pub fn with_max_total_size(mut self, bytes: u64) -> Self {
        self.config.security.max_decompressed_size = bytes;
        self
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(ReaderConfig)` - 設定が有効な場合
    /// * `Err(XlsxReaderError::Config)` - いずれかの上限が0の場合
    pub fn build(self) -> Result<ReaderConfig, XlsxReaderError> {
        let security = &self.config.security;
        if security.max_file_size == 0 {
            return Err(XlsxReaderError::Config(
                "max entry size must be greater than zero".to_string(),
            ));
        }
        if security.max_file_count == 0 {
            return Err(XlsxReaderError::Config(
                "max file count must be greater than zero".to_string(),
            ));
        }
        if security.max_decompressed_size == 0 {
            return Err(XlsxReaderError::Config(
                "max total size must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }

    /// 設定を検証し、リーダーからワークブックを開く
    pub fn open<R: Read + Seek>(self, reader: R) -> Result<ExcelReader<R>, XlsxReaderError> {
        let config = self.build()?;
        ExcelReader::with_config(reader, config)
    }

    /// 設定を検証し、ファイルパスからワークブックを開く
    pub fn open_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<ExcelReader<BufReader<File>>, XlsxReaderError> {
        let config = self.build()?;
        ExcelReader::with_config(BufReader::new(File::open(path)?), config)
    }
}
