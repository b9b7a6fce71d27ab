//! Integration Tests for xlsxcursor
//!
//! rust_xlsxwriterで生成したワークブックと、手作業で組み立てたZIPアーカイブを
//! 公開APIだけで読み込み、カーソルの振る舞いを検証します。

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use xlsxcursor::{
    CellAddress, CellValue, DateSystem, ExcelReader, NullPolicy, ReaderBuilder, XlsxReaderError,
};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// "Data"と"Summary"の2シートを持つワークブック
    ///
    /// Data (A1:D3):
    ///
    /// | Name  | Score | Passed | Date       |
    /// | Alice | 91.5  | TRUE   | 2020-01-01 |
    /// | Bob   | 78    | FALSE  |            |
    pub fn generate_mixed_values() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        let data = workbook.add_worksheet();
        data.set_name("Data")?;
        data.write_string(0, 0, "Name")?;
        data.write_string(0, 1, "Score")?;
        data.write_string(0, 2, "Passed")?;
        data.write_string(0, 3, "Date")?;
        data.write_string(1, 0, "Alice")?;
        data.write_number(1, 1, 91.5)?;
        data.write_boolean(1, 2, true)?;
        data.write_number_with_format(1, 3, 43831.0, &date_format)?;
        data.write_string(2, 0, "Bob")?;
        data.write_number(2, 1, 78.0)?;
        data.write_boolean(2, 2, false)?;

        let summary = workbook.add_worksheet();
        summary.set_name("Summary")?;
        summary.write_string(0, 0, "Total")?;
        summary.write_number(0, 1, 2.0)?;

        workbook.save_to_buffer()
    }

    /// 空セルを含む20行×6列のワークブック
    pub fn generate_sparse_grid() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Grid")?;
        for row in 0..20u32 {
            for col in 0..6u16 {
                if (row + col as u32) % 4 == 3 {
                    continue;
                }
                match col % 3 {
                    0 => sheet.write_number(row, col, row as f64 * 1.5 + col as f64)?,
                    1 => sheet.write_string(row, col, format!("r{}c{}", row, col))?,
                    _ => sheet.write_boolean(row, col, row % 2 == 0)?,
                };
            }
        }
        workbook.save_to_buffer()
    }

    /// エントリ名と内容の組からZIPアーカイブを組み立てる
    pub fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        zip_data
    }

    /// 1セルだけを持つワークシートXML
    pub fn inline_sheet(text: &str) -> String {
        format!(
            r#"<worksheet><dimension ref="A1"/><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>{}</t></is></c></row></sheetData></worksheet>"#,
            text
        )
    }
}

fn open_mixed() -> ExcelReader<Cursor<Vec<u8>>> {
    let data = fixtures::generate_mixed_values().unwrap();
    ExcelReader::from_reader(Cursor::new(data)).unwrap()
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn new_year_2020() -> CellValue {
    CellValue::DateTime(
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

/// シート名と順序
#[test]
fn test_sheet_names() {
    let workbook = open_mixed();
    assert_eq!(workbook.sheet_names(), vec!["Data", "Summary"]);
    assert_eq!(workbook.sheet_count(), 2);
    assert_eq!(workbook.date_system(), DateSystem::V1900);
}

/// 各種アドレス形式でのランダムアクセス
#[test]
fn test_random_access_by_reference() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    assert_eq!(sheet.dimension().to_string(), "A1:D3");
    assert_eq!(sheet.get("A1").unwrap(), text("Name"));
    assert_eq!(sheet.get((2, 2)).unwrap(), CellValue::Number(91.5));
    assert_eq!(sheet.get(("C", 2)).unwrap(), CellValue::Boolean(true));
    assert_eq!(sheet.get("D2").unwrap(), new_year_2020());
    assert_eq!(sheet.get("D3").unwrap(), CellValue::Null);

    // 通り過ぎたセルはキャッシュから返される
    assert_eq!(sheet.get("B1").unwrap(), text("Score"));
    let address = CellAddress::parse("A3").unwrap();
    assert_eq!(sheet.get(address).unwrap(), text("Bob"));
}

/// ディメンション外のアクセス
#[test]
fn test_out_of_range() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    let err = sheet.get("Z100").unwrap_err();
    assert!(matches!(err, XlsxReaderError::OutOfRange { .. }));
    assert_eq!(
        err.to_string(),
        "Z100 is outside the worksheet dimension A1:D3"
    );

    assert!(matches!(
        sheet.get("1A"),
        Err(XlsxReaderError::MalformedAddress(_))
    ));
    assert!(sheet.row(4).is_err());
    assert!(sheet.column_by_name("E").is_err());
}

#[test]
fn test_contains_key() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();
    assert!(sheet.contains_key("A1").unwrap());
    assert!(!sheet.contains_key("D3").unwrap());
    assert!(!sheet.contains_key("Z100").unwrap());
}

/// SkipNullsでの逐次読み込み（行優先、空セルなし）
#[test]
fn test_read_next_skip_nulls() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    let mut addresses = Vec::new();
    while sheet.read_next().unwrap() {
        addresses.push(sheet.address().unwrap().to_string());
    }
    assert_eq!(
        addresses,
        vec!["A1", "B1", "C1", "D1", "A2", "B2", "C2", "D2", "A3", "B3", "C3"]
    );

    // 終端後は何も返さない
    assert!(!sheet.read_next().unwrap());
    assert!(sheet.address().is_none());
    assert!(sheet.value().is_none());

    // 終端後もキャッシュから応答できる
    assert_eq!(sheet.get("A1").unwrap(), text("Name"));
    assert_eq!(sheet.get("D2").unwrap(), new_year_2020());
}

/// ReadAllNullsではディメンション内のすべてのアドレスを返す
#[test]
fn test_read_all_nulls() {
    let data = fixtures::generate_mixed_values().unwrap();
    let mut workbook = ReaderBuilder::new()
        .with_null_policy(NullPolicy::ReadAllNulls)
        .open(Cursor::new(data))
        .unwrap();
    let sheet = workbook.sheet("Data").unwrap();
    assert_eq!(sheet.null_policy(), NullPolicy::ReadAllNulls);

    let mut values = Vec::new();
    while sheet.read_next().unwrap() {
        values.push((sheet.address().unwrap().to_string(), sheet.value().cloned()));
    }
    assert_eq!(values.len(), 12);
    assert_eq!(values[11], ("D3".to_string(), Some(CellValue::Null)));
    assert_eq!(values[7], ("D2".to_string(), Some(new_year_2020())));
}

/// 行内の逐次読み込み
#[test]
fn test_read_next_in_row() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    // 生成直後は最初の行に入る
    let mut first_row = Vec::new();
    while sheet.read_next_in_row().unwrap() {
        first_row.push(sheet.value().cloned().unwrap());
    }
    assert_eq!(
        first_row,
        vec![text("Name"), text("Score"), text("Passed"), text("Date")]
    );
    assert_eq!(sheet.current_row_number(), Some(1));

    // 他の操作で次の行に進むまでfalseのまま
    assert!(!sheet.read_next_in_row().unwrap());

    assert!(sheet.read_next().unwrap());
    assert_eq!(sheet.address().unwrap().to_string(), "A2");
    assert_eq!(sheet.current_row_number(), Some(2));
    assert_eq!(sheet.previous_row_number(), Some(1));

    assert!(sheet.read_next_in_row().unwrap());
    assert_eq!(sheet.value(), Some(&CellValue::Number(91.5)));
}

/// getで通り過ぎたセルは逐次読み込みでは返されない
#[test]
fn test_get_then_read_next() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    assert_eq!(sheet.get("B2").unwrap(), CellValue::Number(91.5));
    assert!(sheet.read_next().unwrap());
    assert_eq!(sheet.address().unwrap().to_string(), "C2");
    assert_eq!(sheet.value(), Some(&CellValue::Boolean(true)));
}

/// 読み込み開始後の空セルの扱いの変更
#[test]
fn test_null_policy_locked_after_read() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    sheet
        .set_null_policy(NullPolicy::ReadNullsOnPopulatedRows)
        .unwrap();
    assert!(sheet.read_next().unwrap());

    // 同じ設定の再指定は許可
    assert!(sheet
        .set_null_policy(NullPolicy::ReadNullsOnPopulatedRows)
        .is_ok());
    assert!(matches!(
        sheet.set_null_policy(NullPolicy::SkipNulls),
        Err(XlsxReaderError::Config(_))
    ));
}

/// 行・列・範囲の列挙
#[test]
fn test_row_column_range() {
    let mut workbook = open_mixed();
    let sheet = workbook.sheet("Data").unwrap();

    let row: Vec<CellValue> = sheet.row(2).unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        row,
        vec![
            text("Alice"),
            CellValue::Number(91.5),
            CellValue::Boolean(true),
            new_year_2020()
        ]
    );

    let column: Vec<CellValue> = sheet
        .column_by_name("B")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        column,
        vec![
            text("Score"),
            CellValue::Number(91.5),
            CellValue::Number(78.0)
        ]
    );

    let range: Vec<CellValue> = sheet
        .range("C2", "D3")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        range,
        vec![
            CellValue::Boolean(true),
            new_year_2020(),
            CellValue::Boolean(false),
            CellValue::Null
        ]
    );
}

/// 存在しないシートのエラーメッセージ
#[test]
fn test_sheet_not_found() {
    let mut workbook = open_mixed();

    let err = workbook.sheet("Missing").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sheet with name 'Missing' was not found in the workbook"
    );

    let err = workbook.sheet_at(5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sheet with zero-based index 5 not found in the workbook. Workbook contains 2 sheets"
    );
}

/// 同じシートには同じカーソルが返される
#[test]
fn test_same_cursor_returned() {
    let mut workbook = open_mixed();

    assert!(workbook.sheet("Data").unwrap().read_next().unwrap());
    let sheet = workbook.sheet("Data").unwrap();
    assert!(sheet.read_next().unwrap());
    assert_eq!(sheet.address().unwrap().to_string(), "B1");

    // インデックスでも同じカーソル
    let sheet = workbook.sheet_at(0).unwrap();
    assert!(sheet.read_next().unwrap());
    assert_eq!(sheet.address().unwrap().to_string(), "C1");

    // open_sheetは独立したカーソル
    let mut fresh = workbook.open_sheet("Data").unwrap();
    assert!(fresh.read_next().unwrap());
    assert_eq!(fresh.address().unwrap().to_string(), "A1");
}

/// ファイルパスから開く
#[test]
fn test_open_from_path() {
    let data = fixtures::generate_mixed_values().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let mut workbook = ExcelReader::open(file.path()).unwrap();
    let sheet = workbook.sheet("Summary").unwrap();
    assert_eq!(sheet.get("A1").unwrap(), text("Total"));
    assert_eq!(sheet.get("B1").unwrap(), CellValue::Number(2.0));

    let mut workbook = ReaderBuilder::new().open_path(file.path()).unwrap();
    assert_eq!(workbook.sheet_count(), 2);
    assert!(workbook.first_date_style_id().unwrap().is_some());
}

#[test]
fn test_file_not_found() {
    let result = ExcelReader::open("/nonexistent/path/file.xlsx");
    assert!(matches!(result, Err(XlsxReaderError::Io(_))));
}

/// すべてのシートを並列に処理
#[test]
fn test_map_sheets_parallel() {
    let mut workbook = open_mixed();
    let counts = workbook
        .map_sheets_parallel(|name, mut sheet| {
            let mut count = 0;
            while sheet.read_next()? {
                count += 1;
            }
            Ok((name.to_string(), count))
        })
        .unwrap();
    assert_eq!(
        counts,
        vec![("Data".to_string(), 11), ("Summary".to_string(), 2)]
    );
}

/// calamineの読み込み結果と一致することを確認
#[test]
fn test_matches_calamine() {
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

    let data = fixtures::generate_sparse_grid().unwrap();
    let mut oracle: Xlsx<_> = open_workbook_from_rs(Cursor::new(data.clone())).unwrap();
    let expected = oracle.worksheet_range("Grid").unwrap();
    let (start_row, start_col) = expected.start().unwrap();

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    let sheet = workbook.sheet("Grid").unwrap();

    let mut compared = 0;
    for (row, col, value) in expected.cells() {
        let address = (start_row + row as u32 + 1, start_col + col as u32 + 1);
        let actual = sheet.get(address).unwrap();
        let expected = match value {
            Data::Empty => CellValue::Null,
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Boolean(*b),
            other => panic!("unexpected calamine value {:?}", other),
        };
        assert_eq!(actual, expected, "mismatch at {:?}", address);
        compared += 1;
    }
    assert_eq!(compared, 120);
}

/// 関連付けがない場合、ワークシートエントリを数値順に対応付ける
#[test]
fn test_sheet_order_without_relationships() {
    let workbook_xml = r#"<workbook><sheets>
        <sheet name="First" sheetId="1"/>
        <sheet name="Second" sheetId="2"/>
        <sheet name="Tenth" sheetId="3"/>
    </sheets></workbook>"#;
    let one = fixtures::inline_sheet("one");
    let two = fixtures::inline_sheet("two");
    let ten = fixtures::inline_sheet("ten");
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", workbook_xml),
        ("xl/worksheets/sheet10.xml", &ten),
        ("xl/worksheets/sheet2.xml", &two),
        ("xl/worksheets/sheet1.xml", &one),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["First", "Second", "Tenth"]);
    assert_eq!(workbook.sheet("Tenth").unwrap().get("A1").unwrap(), text("ten"));
    assert_eq!(workbook.sheet_at(1).unwrap().get("A1").unwrap(), text("two"));
}

/// シート宣言がない場合は`Sheet{N}`と名付ける
#[test]
fn test_sheet_names_without_declarations() {
    let one = fixtures::inline_sheet("one");
    let two = fixtures::inline_sheet("two");
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", "<workbook/>"),
        ("xl/worksheets/sheet1.xml", &one),
        ("xl/worksheets/sheet2.xml", &two),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Sheet1", "Sheet2"]);
    assert_eq!(workbook.sheet("Sheet2").unwrap().get("A1").unwrap(), text("two"));
}

/// 関連付けによる対応付け（エントリ順と宣言順が異なる）
#[test]
fn test_sheet_mapping_by_relationships() {
    let workbook_xml = r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>
        <sheet name="Alpha" sheetId="1" r:id="rId7"/>
        <sheet name="Beta" sheetId="2" r:id="rId3"/>
    </sheets></workbook>"#;
    let rels = r#"<Relationships>
        <Relationship Id="rId3" Target="worksheets/sheet1.xml"/>
        <Relationship Id="rId7" Target="/xl/worksheets/sheet2.xml"/>
    </Relationships>"#;
    let first = fixtures::inline_sheet("from sheet1");
    let second = fixtures::inline_sheet("from sheet2");
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", workbook_xml),
        ("xl/_rels/workbook.xml.rels", rels),
        ("xl/worksheets/sheet1.xml", &first),
        ("xl/worksheets/sheet2.xml", &second),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(
        workbook.sheet("Alpha").unwrap().get("A1").unwrap(),
        text("from sheet2")
    );
    assert_eq!(
        workbook.sheet("Beta").unwrap().get("A1").unwrap(),
        text("from sheet1")
    );
}

/// 名前空間プレフィックス付きの要素
#[test]
fn test_prefixed_elements() {
    let sheet = r#"<x:worksheet xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <x:dimension ref="A1:B1"/>
  <x:sheetData>
    <x:row r="1">
      <x:c r="A1" t="inlineStr"><x:is><x:t>prefixed</x:t></x:is></x:c>
      <x:c r="B1"><x:v>7</x:v></x:c>
    </x:row>
  </x:sheetData>
</x:worksheet>"#;
    let data = fixtures::build_archive(&[
        (
            "xl/workbook.xml",
            r#"<x:workbook xmlns:x="main"><x:sheets><x:sheet name="P" sheetId="1"/></x:sheets></x:workbook>"#,
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    let sheet = workbook.sheet("P").unwrap();
    assert_eq!(sheet.get("A1").unwrap(), text("prefixed"));
    assert_eq!(sheet.get("B1").unwrap(), CellValue::Number(7.0));
}

/// 欠けたセルと欠けた行をReadAllNullsで補う
#[test]
fn test_read_all_nulls_fills_gaps() {
    let sheet = r#"<worksheet><dimension ref="A1:C3"/><sheetData>
  <row r="1"><c r="A1"><v>1</v></c><c r="C1"><v>3</v></c></row>
  <row r="3"><c r="B3"><v>8</v></c></row>
</sheetData></worksheet>"#;
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", "<workbook/>"),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let mut workbook = ReaderBuilder::new()
        .with_null_policy(NullPolicy::ReadAllNulls)
        .open(Cursor::new(data))
        .unwrap();
    let sheet = workbook.sheet_at(0).unwrap();

    let mut values = Vec::new();
    while sheet.read_next().unwrap() {
        values.push(sheet.value().cloned().unwrap());
    }
    let n = CellValue::Number;
    assert_eq!(
        values,
        vec![
            n(1.0),
            CellValue::Null,
            n(3.0),
            CellValue::Null,
            CellValue::Null,
            CellValue::Null,
            CellValue::Null,
            n(8.0),
            CellValue::Null,
        ]
    );
}

/// セル型ごとのデコード
#[test]
fn test_cell_types() {
    let sheet = r#"<worksheet><dimension ref="A1:F1"/><sheetData><row r="1">
  <c r="A1" t="e"><f>1/0</f><v>#DIV/0!</v></c>
  <c r="B1" t="str"><f>"a"&amp;"b"</f><v>ab</v></c>
  <c r="C1" t="d"><v>2021-03-04T05:06:07</v></c>
  <c r="D1" t="inlineStr"><is><r><t>rich </t></r><r><t>text</t></r></is></c>
  <c r="E1" t="b"><v>0</v></c>
  <c r="F1" s="0"/>
</row></sheetData></worksheet>"#;
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", "<workbook/>"),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    let sheet = workbook.sheet("Sheet1").unwrap();
    assert_eq!(sheet.get("A1").unwrap(), text("#DIV/0!"));
    assert_eq!(sheet.get("B1").unwrap(), text("ab"));
    assert_eq!(
        sheet.get("C1").unwrap(),
        CellValue::DateTime(
            NaiveDate::from_ymd_opt(2021, 3, 4)
                .unwrap()
                .and_hms_opt(5, 6, 7)
                .unwrap()
        )
    );
    assert_eq!(sheet.get("D1").unwrap(), text("rich text"));
    assert_eq!(sheet.get("E1").unwrap(), CellValue::Boolean(false));
    assert_eq!(sheet.get("F1").unwrap(), CellValue::Null);
}

/// 1904年日付システム
#[test]
fn test_date1904() {
    let styles = r#"<styleSheet><cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14"/></cellXfs></styleSheet>"#;
    let sheet = r#"<worksheet><dimension ref="A1:B1"/><sheetData><row r="1">
  <c r="A1" s="1"><v>0</v></c><c r="B1" s="0"><v>0</v></c>
</row></sheetData></worksheet>"#;
    let data = fixtures::build_archive(&[
        (
            "xl/workbook.xml",
            r#"<workbook><workbookPr date1904="1"/><sheets><sheet name="S" sheetId="1"/></sheets></workbook>"#,
        ),
        ("xl/styles.xml", styles),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(workbook.date_system(), DateSystem::V1904);
    assert_eq!(workbook.first_date_style_id().unwrap(), Some(1));

    let sheet = workbook.sheet("S").unwrap();
    assert_eq!(
        sheet.get("A1").unwrap(),
        CellValue::DateTime(
            NaiveDate::from_ymd_opt(1904, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        )
    );
    assert_eq!(sheet.get("B1").unwrap(), CellValue::Number(0.0));
}

/// sharedStrings.xmlがない場合、共有文字列の参照はKeyNotFoundになる
#[test]
fn test_missing_shared_strings() {
    let sheet = r#"<worksheet><dimension ref="A1:B1"/><sheetData><row r="1">
  <c r="A1"><v>5</v></c><c r="B1" t="s"><v>0</v></c>
</row></sheetData></worksheet>"#;
    let data = fixtures::build_archive(&[
        ("xl/workbook.xml", "<workbook/>"),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);

    let mut workbook = ExcelReader::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(workbook.first_date_style_id().unwrap(), None);

    let sheet = workbook.sheet("Sheet1").unwrap();
    assert_eq!(sheet.get("A1").unwrap(), CellValue::Number(5.0));
    let err = sheet.get("B1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "The key '0' was not found in the shared string table"
    );
}

/// XLSXではない入力
#[test]
fn test_invalid_file_format() {
    let result = ExcelReader::from_reader(Cursor::new(b"not a zip archive".to_vec()));
    assert!(matches!(result, Err(XlsxReaderError::Zip(_))));

    let data = fixtures::build_archive(&[("docProps/app.xml", "<Properties/>")]);
    let result = ExcelReader::from_reader(Cursor::new(data));
    assert!(matches!(result, Err(XlsxReaderError::InvalidFormat(_))));
}
