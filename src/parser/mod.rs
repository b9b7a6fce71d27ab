//! Parser Module
//!
//! XLSX（ZIPアーカイブ）内のXMLエントリを前方向にストリーミング解析する実装。
//! ワークブックのコンテナ、ワークシートのカーソル、共有文字列・スタイルの遅延インデックスを提供します。

use std::io::Cursor;
use std::sync::Arc;

mod index;
mod shared_strings;
mod styles;
mod workbook;
mod worksheet;

pub use workbook::ExcelReader;
pub use worksheet::{CellValues, SheetReader};

pub(crate) use shared_strings::SharedStringIndex;
pub(crate) use styles::StyleDateIndex;

/// 展開済みのZIPエントリを読み進めるストリーム
///
/// エントリのバイト列は`Arc`で共有されるため、同じエントリから
/// 複数の独立したカーソルを生成できます。
pub type EntryStream = Cursor<Arc<[u8]>>;
