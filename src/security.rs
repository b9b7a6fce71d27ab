//! Security Module
//!
//! セキュリティ対策を実装するモジュール。
//! ZIP bomb攻撃、パストラバーサル攻撃、過大な入力ファイルへの対策を提供します。

use std::io::{Read, Seek};

use zip::ZipArchive;

use crate::error::XlsxReaderError;

/// セキュリティ設定
///
/// ワークブックを開く際のアーカイブ制限を定義します。
/// `ReaderBuilder`の`with_max_*`メソッドで変更できます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 展開後の合計最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一エントリの最大展開サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600,         // 100MB
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// ファイルパスの検証
///
/// パストラバーサル攻撃を防ぐため、ファイルパスを検証します。
///
/// # 引数
///
/// * `path` - 検証するファイルパス
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // Windows形式の`C:\`やUnix形式の`/`で始まるパス
    let bytes = path.as_bytes();
    let has_drive = bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && &bytes[1..3] == b":\\";
    if path.starts_with('/') || has_drive {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.split('/').any(|segment| segment == "..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

/// アーカイブ全体の制限を検証
///
/// エントリ数、各エントリのパスと宣言された展開サイズ、展開サイズの合計を確認します。
pub(crate) fn validate_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    config: &SecurityConfig,
) -> Result<(), XlsxReaderError> {
    if archive.len() > config.max_file_count {
        return Err(XlsxReaderError::SecurityViolation(format!(
            "ZIP archive contains too many files: {} (max: {})",
            archive.len(),
            config.max_file_count
        )));
    }

    let mut total_decompressed_size = 0u64;
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| XlsxReaderError::Zip(format!("{}", e)))?;

        let file_name = file.name();
        validate_zip_path(file_name).map_err(|e| {
            XlsxReaderError::SecurityViolation(format!("Invalid ZIP path: {}", e))
        })?;

        let file_size = file.size();
        if file_size > config.max_file_size {
            return Err(XlsxReaderError::SecurityViolation(format!(
                "File '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                file_name, file_size, config.max_file_size
            )));
        }

        total_decompressed_size =
            total_decompressed_size
                .checked_add(file_size)
                .ok_or_else(|| {
                    XlsxReaderError::SecurityViolation(
                        "Total decompressed size calculation overflow".to_string(),
                    )
                })?;

        if total_decompressed_size > config.max_decompressed_size {
            return Err(XlsxReaderError::SecurityViolation(format!(
                "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total_decompressed_size, config.max_decompressed_size
            )));
        }
    }

    Ok(())
}

/// エントリを展開してメモリに読み込む
///
/// 宣言サイズが偽装されている場合に備え、実際の展開量も`max_file_size`で打ち切ります。
pub(crate) fn read_limited<T: Read>(
    mut entry: T,
    name: &str,
    config: &SecurityConfig,
) -> Result<Vec<u8>, XlsxReaderError> {
    let mut content = Vec::new();
    entry
        .by_ref()
        .take(config.max_file_size.saturating_add(1))
        .read_to_end(&mut content)?;

    if content.len() as u64 > config.max_file_size {
        return Err(XlsxReaderError::SecurityViolation(format!(
            "File '{}' expands beyond maximum size: {} bytes",
            name, config.max_file_size
        )));
    }
    Ok(content)
}
