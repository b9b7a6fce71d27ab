//! xlsxcursor - Pure-Rust streaming XLSX cell reader
//!
//! This crate reads cell values from XLSX workbooks without materializing them.
//! Every worksheet is exposed as a forward-only cursor that supports random-access
//! lookups backed by a per-cursor cache, sequential iteration under three null
//! policies, and lazily built shared-string and date-style indexes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxcursor::ExcelReader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut workbook = ExcelReader::open("example.xlsx")?;
//!     let sheet = workbook.sheet("Sheet1")?;
//!
//!     // Random access by A1 reference, (row, column) or (column letters, row)
//!     println!("A1 = {}", sheet.get("A1")?);
//!     println!("B2 = {}", sheet.get((2, 2))?);
//!
//!     // Sequential reading of every non-empty cell
//!     while sheet.read_next()? {
//!         println!("{:?} = {:?}", sheet.address(), sheet.value());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Null Policies
//!
//! ```rust,no_run
//! use xlsxcursor::{NullPolicy, ReaderBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut workbook = ReaderBuilder::new()
//!         .with_null_policy(NullPolicy::ReadAllNulls)
//!         .open_path("example.xlsx")?;
//!
//!     // Every address of the worksheet dimension, in row-major order
//!     let sheet = workbook.sheet_at(0)?;
//!     while sheet.read_next()? {
//!         println!("{:?}", sheet.value());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Parallel Reading
//!
//! Cursors opened with `open_sheet` own their state and can be moved to other threads.
//!
//! ```rust,no_run
//! use xlsxcursor::ExcelReader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut workbook = ExcelReader::open("example.xlsx")?;
//!     let names = workbook.map_sheets_parallel(|name, sheet| {
//!         Ok(format!("{} {}", name, sheet.dimension()))
//!     })?;
//!     println!("{:?}", names);
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod datetime;
mod error;
mod format;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{DateSystem, NullPolicy, ToCellAddress};
pub use builder::{ReaderBuilder, ReaderConfig};
pub use error::XlsxReaderError;
pub use parser::{CellValues, EntryStream, ExcelReader, SheetReader};
pub use security::SecurityConfig;
pub use types::{
    column_name_to_number, number_to_column_name, CellAddress, CellRange, CellRangeIter,
    CellValue, WorksheetDimension,
};
