//! Workbook Container Module
//!
//! XLSXファイル（ZIPアーカイブ）を開き、シート名の解決とワークシートカーソルの生成を行います。

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::Event;
use quick_xml::Reader;
use rayon::prelude::*;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::api::DateSystem;
use crate::builder::ReaderConfig;
use crate::error::XlsxReaderError;
use crate::parser::{EntryStream, SharedStringIndex, SheetReader, StyleDateIndex};
use crate::security::{read_limited, validate_archive};

const WORKBOOK_PATH: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";
const STYLES_PATH: &str = "xl/styles.xml";
const WORKSHEETS_DIR: &str = "xl/worksheets/";

/// ワークブック内のシート
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    path: String,
}

/// `xl/workbook.xml`から読み取ったシート宣言
#[derive(Debug, Clone)]
struct SheetDeclaration {
    name: String,
    relationship_id: Option<String>,
}

/// XLSXワークブック
///
/// 開いた時点では`xl/workbook.xml`（と関連付け）だけを読み込みます。
/// ワークシート・共有文字列・スタイルのエントリは、カーソルを生成するときに初めて展開されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcursor::ExcelReader;
///
/// # fn main() -> Result<(), xlsxcursor::XlsxReaderError> {
/// let mut workbook = ExcelReader::open("report.xlsx")?;
/// println!("sheets: {:?}", workbook.sheet_names());
///
/// let sheet = workbook.sheet("Summary")?;
/// println!("A1 = {}", sheet.get("A1")?);
/// # Ok(())
/// # }
/// ```
pub struct ExcelReader<R: Read + Seek> {
    archive: ZipArchive<R>,
    config: ReaderConfig,
    sheets: Vec<SheetEntry>,
    date_system: DateSystem,
    shared_strings: Option<Arc<[u8]>>,
    styles: Option<Arc<[u8]>>,
    style_index: Option<StyleDateIndex<EntryStream>>,
    cursors: HashMap<usize, SheetReader>,
}

impl ExcelReader<BufReader<File>> {
    /// ファイルパスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExcelReader)` - ワークブックを開けた場合
    /// * `Err(XlsxReaderError::Io)` - ファイルを開けない場合
    /// * `Err(XlsxReaderError::Zip)` / `Err(XlsxReaderError::InvalidFormat)` - XLSXとして不正な場合
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, XlsxReaderError> {
        Self::with_config(
            BufReader::new(File::open(path)?),
            ReaderConfig::default(),
        )
    }
}

impl<R: Read + Seek> ExcelReader<R> {
    /// 任意のリーダーからワークブックを開く
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsxcursor::ExcelReader;
    ///
    /// # fn main() -> Result<(), xlsxcursor::XlsxReaderError> {
    /// let bytes: Vec<u8> = std::fs::read("report.xlsx")?;
    /// let workbook = ExcelReader::from_reader(Cursor::new(bytes))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader(reader: R) -> Result<Self, XlsxReaderError> {
        Self::with_config(reader, ReaderConfig::default())
    }

    /// 設定を指定してワークブックを開く
    pub(crate) fn with_config(mut reader: R, config: ReaderConfig) -> Result<Self, XlsxReaderError> {
        let input_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        if input_size > config.security.max_input_file_size {
            return Err(XlsxReaderError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                input_size, config.security.max_input_file_size
            )));
        }

        let mut archive =
            ZipArchive::new(reader).map_err(|e| XlsxReaderError::Zip(format!("{}", e)))?;
        validate_archive(&mut archive, &config.security)?;

        let mut workbook = Self {
            archive,
            config,
            sheets: Vec::new(),
            date_system: DateSystem::V1900,
            shared_strings: None,
            styles: None,
            style_index: None,
            cursors: HashMap::new(),
        };

        let workbook_xml = workbook.read_entry(WORKBOOK_PATH)?.ok_or_else(|| {
            XlsxReaderError::InvalidFormat(format!("missing {}", WORKBOOK_PATH))
        })?;
        let (declarations, date_system) = parse_workbook(&workbook_xml)?;
        workbook.date_system = date_system;

        let relationships = match workbook.read_entry(WORKBOOK_RELS_PATH)? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };
        let worksheet_paths = worksheet_entries(workbook.archive.file_names());
        workbook.sheets = resolve_sheets(declarations, &relationships, &worksheet_paths);

        log::debug!(
            "opened workbook with {} sheets ({:?} date system)",
            workbook.sheets.len(),
            workbook.date_system
        );
        Ok(workbook)
    }

    /// シート名の一覧（ワークブック内の順序）
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// シート数
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// ワークブックの日付システム
    pub fn date_system(&self) -> DateSystem {
        self.date_system
    }

    /// 名前でシートを取得
    ///
    /// 同じシートに対しては常に同じカーソルを返します（読み込み位置とキャッシュを共有します）。
    /// 独立したカーソルが必要な場合は`open_sheet`を使用します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(&mut SheetReader)` - カーソル
    /// * `Err(XlsxReaderError::SheetNotFound)` - 名前に一致するシートがない場合
    pub fn sheet(&mut self, name: &str) -> Result<&mut SheetReader, XlsxReaderError> {
        let index = self.sheet_index(name)?;
        self.sheet_at(index)
    }

    /// インデックス（0始まり）でシートを取得
    ///
    /// # 戻り値
    ///
    /// * `Ok(&mut SheetReader)` - カーソル
    /// * `Err(XlsxReaderError::SheetIndexNotFound)` - インデックスがシート数以上の場合
    pub fn sheet_at(&mut self, index: usize) -> Result<&mut SheetReader, XlsxReaderError> {
        if !self.cursors.contains_key(&index) {
            let cursor = self.open_sheet_at(index)?;
            self.cursors.insert(index, cursor);
        }
        let count = self.sheets.len();
        self.cursors
            .get_mut(&index)
            .ok_or(XlsxReaderError::SheetIndexNotFound { index, count })
    }

    /// 名前で新しい独立したカーソルを生成
    ///
    /// 返されるカーソルはワークブックを借用しないため、別スレッドに移動できます。
    pub fn open_sheet(&mut self, name: &str) -> Result<SheetReader, XlsxReaderError> {
        let index = self.sheet_index(name)?;
        self.open_sheet_at(index)
    }

    /// インデックス（0始まり）で新しい独立したカーソルを生成
    pub fn open_sheet_at(&mut self, index: usize) -> Result<SheetReader, XlsxReaderError> {
        let count = self.sheets.len();
        let entry = self
            .sheets
            .get(index)
            .cloned()
            .ok_or(XlsxReaderError::SheetIndexNotFound { index, count })?;

        let worksheet = self.read_entry(&entry.path)?.ok_or_else(|| {
            XlsxReaderError::InvalidFormat(format!(
                "worksheet entry '{}' for sheet '{}' is missing",
                entry.path, entry.name
            ))
        })?;
        let shared_strings = self.shared_strings_bytes()?;
        let styles = self.styles_bytes()?;

        log::debug!("opening sheet '{}' from {}", entry.name, entry.path);
        let mut cursor = SheetReader::new(
            Cursor::new(worksheet),
            SharedStringIndex::new(Cursor::new(shared_strings)),
            StyleDateIndex::new(Cursor::new(styles)),
            self.date_system,
        )?;
        cursor.set_null_policy(self.config.null_policy)?;
        Ok(cursor)
    }

    /// 日付・時刻書式を持つ最初のスタイルID
    ///
    /// ワークブック全体で共有されるスタイルインデックスを使用します。
    pub fn first_date_style_id(&mut self) -> Result<Option<usize>, XlsxReaderError> {
        if self.style_index.is_none() {
            let styles = self.styles_bytes()?;
            self.style_index = Some(StyleDateIndex::new(Cursor::new(styles)));
        }
        match self.style_index.as_mut() {
            Some(index) => index.first_date_style_id(),
            None => Ok(None),
        }
    }

    /// すべてのシートを並列に処理
    ///
    /// シートごとに独立したカーソルを生成し、rayonのスレッドプールで`f`を適用します。
    /// 結果はワークブック内のシート順に並びます。
    ///
    /// ```rust,no_run
    /// use xlsxcursor::ExcelReader;
    ///
    /// # fn main() -> Result<(), xlsxcursor::XlsxReaderError> {
    /// let mut workbook = ExcelReader::open("report.xlsx")?;
    /// let counts = workbook.map_sheets_parallel(|_name, mut sheet| {
    ///     let mut count = 0;
    ///     while sheet.read_next()? {
    ///         count += 1;
    ///     }
    ///     Ok(count)
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn map_sheets_parallel<T, F>(&mut self, f: F) -> Result<Vec<T>, XlsxReaderError>
    where
        T: Send,
        F: Fn(&str, SheetReader) -> Result<T, XlsxReaderError> + Sync + Send,
    {
        // ZIPアーカイブはスレッド間で共有できないため、展開は逐次に行う
        let mut opened = Vec::with_capacity(self.sheets.len());
        for index in 0..self.sheets.len() {
            let cursor = self.open_sheet_at(index)?;
            opened.push((self.sheets[index].name.clone(), cursor));
        }

        opened
            .into_par_iter()
            .map(|(name, cursor)| f(&name, cursor))
            .collect()
    }

    fn sheet_index(&self, name: &str) -> Result<usize, XlsxReaderError> {
        self.sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| XlsxReaderError::SheetNotFound(name.to_string()))
    }

    fn shared_strings_bytes(&mut self) -> Result<Arc<[u8]>, XlsxReaderError> {
        if let Some(bytes) = &self.shared_strings {
            return Ok(Arc::clone(bytes));
        }
        let bytes = self
            .read_entry(SHARED_STRINGS_PATH)?
            .unwrap_or_else(|| Arc::from(Vec::new()));
        self.shared_strings = Some(Arc::clone(&bytes));
        Ok(bytes)
    }

    fn styles_bytes(&mut self) -> Result<Arc<[u8]>, XlsxReaderError> {
        if let Some(bytes) = &self.styles {
            return Ok(Arc::clone(bytes));
        }
        let bytes = self
            .read_entry(STYLES_PATH)?
            .unwrap_or_else(|| Arc::from(Vec::new()));
        self.styles = Some(Arc::clone(&bytes));
        Ok(bytes)
    }

    /// エントリを展開して読み込む（存在しない場合は`None`）
    fn read_entry(&mut self, path: &str) -> Result<Option<Arc<[u8]>>, XlsxReaderError> {
        let file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(XlsxReaderError::Zip(format!("{}", e))),
        };
        let content = read_limited(file, path, &self.config.security)?;
        log::debug!("loaded entry {} ({} bytes)", path, content.len());
        Ok(Some(Arc::from(content)))
    }
}

/// `xl/workbook.xml`からシート宣言と日付システムを読み取る
fn parse_workbook(xml: &[u8]) -> Result<(Vec<SheetDeclaration>, DateSystem), XlsxReaderError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();
    let mut date_system = DateSystem::V1900;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"workbookPr" => {
                    // <workbookPr date1904="1"/>
                    for attr in e.attributes() {
                        let attr = attr.map_err(XlsxReaderError::attr)?;
                        if attr.key.local_name().as_ref() == b"date1904" {
                            let value = std::str::from_utf8(&attr.value)?;
                            if value == "1" || value.eq_ignore_ascii_case("true") {
                                date_system = DateSystem::V1904;
                            }
                        }
                    }
                }
                b"sheet" => {
                    // <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
                    let mut name = None;
                    let mut relationship_id = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(XlsxReaderError::attr)?;
                        match attr.key.local_name().as_ref() {
                            b"name" => name = Some(attr.decode_and_unescape_value(&reader)?.into_owned()),
                            b"id" => {
                                relationship_id = Some(std::str::from_utf8(&attr.value)?.to_string())
                            }
                            _ => {}
                        }
                    }
                    if let Some(name) = name {
                        sheets.push(SheetDeclaration {
                            name,
                            relationship_id,
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((sheets, date_system))
}

/// `xl/_rels/workbook.xml.rels`から関連付けID → エントリパスの対応を読み取る
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, XlsxReaderError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = None;
                    let mut target = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(XlsxReaderError::attr)?;
                        match attr.key.as_ref() {
                            b"Id" => id = Some(std::str::from_utf8(&attr.value)?.to_string()),
                            b"Target" => target = Some(attr.decode_and_unescape_value(&reader)?.into_owned()),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(target)) = (id, target) {
                        relationships.insert(id, resolve_target(&target));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

/// 関連付けのターゲットをアーカイブ内のパスに変換
///
/// `worksheets/sheet1.xml`は`xl/`からの相対、`/xl/worksheets/sheet1.xml`は絶対パスです。
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// `xl/worksheets/sheetN.xml`のエントリを`N`の数値順に並べる
///
/// 辞書順では`sheet10.xml`が`sheet2.xml`より前になるため、末尾の数値で比較します。
fn worksheet_entries<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut entries: Vec<(u64, String)> = names
        .filter_map(|name| {
            let file = name.strip_prefix(WORKSHEETS_DIR)?;
            let stem = file.strip_suffix(".xml")?;
            if stem.contains('/') {
                return None;
            }
            let digits: String = stem
                .chars()
                .rev()
                .take_while(|c| c.is_ascii_digit())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            let number = digits.parse().unwrap_or(u64::MAX);
            Some((number, name.to_string()))
        })
        .collect();
    entries.sort();
    entries.into_iter().map(|(_, name)| name).collect()
}

/// シート宣言をエントリパスに対応付ける
///
/// 関連付けで解決できないシートは、数値順に並べたワークシートエントリの同じ位置に対応付けます。
/// `workbook.xml`にシート宣言がない場合は、エントリごとに`Sheet{N}`という名前を付けます。
fn resolve_sheets(
    declarations: Vec<SheetDeclaration>,
    relationships: &HashMap<String, String>,
    worksheet_paths: &[String],
) -> Vec<SheetEntry> {
    if declarations.is_empty() {
        return worksheet_paths
            .iter()
            .enumerate()
            .map(|(i, path)| SheetEntry {
                name: format!("Sheet{}", i + 1),
                path: path.clone(),
            })
            .collect();
    }

    declarations
        .into_iter()
        .enumerate()
        .filter_map(|(i, declaration)| {
            let path = declaration
                .relationship_id
                .as_ref()
                .and_then(|id| relationships.get(id))
                .cloned()
                .or_else(|| worksheet_paths.get(i).cloned())?;
            Some(SheetEntry {
                name: declaration.name,
                path,
            })
        })
        .collect()
}
