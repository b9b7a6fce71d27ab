//! Worksheet Cursor Module
//!
//! 1枚のワークシートXMLを前方向にのみ読み進めるカーソル`SheetReader`を提供します。
//!
//! # 読み込み方式
//!
//! - ランダムアクセス（`get`）: 目的のセルに到達するか、通り過ぎるまでストリームを進めます。
//!   途中でデコードしたセルはすべてキャッシュされ、再デコードされません。
//! - 逐次読み込み（`read_next`、`read_next_in_row`）: `NullPolicy`に従って次のセルに進みます。
//!
//! どちらの操作も同じストリームを共有します。`get`で通り過ぎたセルは
//! 逐次読み込みでは（キャッシュから補われる`ReadAllNulls`を除き）返されません。

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::api::{DateSystem, NullPolicy, ToCellAddress};
use crate::datetime::{parse_iso_datetime, serial_to_datetime};
use crate::error::XlsxReaderError;
use crate::parser::shared_strings::SharedStringIndex;
use crate::parser::styles::StyleDateIndex;
use crate::parser::EntryStream;
use crate::types::{
    column_name_to_number, CellAddress, CellRangeIter, CellValue, WorksheetDimension,
};

/// カーソルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// ディメンションを読み取り済みで、セルはまだ読んでいない
    DimensionKnown,
    /// `<sheetData>`内を読み進めている
    Streaming,
    /// `<sheetData>`の終端（またはファイル終端）に到達した
    Exhausted,
}

/// 行要素に対する位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    BeforeRow,
    InRow,
    AfterRow,
}

/// ストリームから取り出した構造上のイベント
#[derive(Debug, Clone, PartialEq)]
enum ScanEvent {
    RowStart(u32),
    Cell(CellAddress, CellValue),
    RowEnd(u32),
}

/// XMLイベントから必要な情報だけを取り出した所有型のタグ
///
/// 読み取りバッファへの借用を切り離すために使います。
enum Tag {
    Dimension(String),
    SheetDataStart,
    SheetDataEnd,
    Row { number: Option<u32>, empty: bool },
    RowEnd,
    Cell { attrs: CellAttrs, empty: bool },
    Eof,
    Other,
}

/// `<c>`要素の属性
#[derive(Debug, Default)]
struct CellAttrs {
    reference: Option<String>,
    style: Option<usize>,
    cell_type: Option<String>,
}

/// `<c>`要素の内容
#[derive(Debug, Default)]
struct CellPayload {
    /// `<v>`のテキスト
    value: Option<String>,
    /// `<is>`内の`<t>`を連結したテキスト
    inline: Option<String>,
}

/// `<c>`要素の内側で現在読んでいる要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadTarget {
    None,
    Value,
    Inline,
}

/// ワークシートの前方向カーソル
///
/// `ExcelReader::sheet()`などから取得します。ストリームは巻き戻せませんが、
/// デコード済みのセルはキャッシュされるため、読み戻しは常にキャッシュから応答されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcursor::ExcelReader;
///
/// # fn main() -> Result<(), xlsxcursor::XlsxReaderError> {
/// let mut workbook = ExcelReader::open("report.xlsx")?;
/// let sheet = workbook.sheet_at(0)?;
///
/// // ランダムアクセス
/// let title = sheet.get("A1")?;
///
/// // 逐次読み込み
/// while sheet.read_next()? {
///     println!("{} = {}", sheet.address().unwrap(), sheet.value().unwrap());
/// }
/// # Ok(())
/// # }
/// ```
pub struct SheetReader<R: BufRead = EntryStream> {
    reader: Reader<R>,
    buf: Vec<u8>,
    shared_strings: SharedStringIndex<R>,
    styles: StyleDateIndex<R>,
    date_system: DateSystem,
    dimension: WorksheetDimension,
    state: CursorState,
    row_state: RowState,
    current_row_number: Option<u32>,
    previous_row_number: Option<u32>,
    /// `r`属性のないセルに割り当てる次の列番号
    next_column: u32,
    /// 空行（`<row/>`）の直後に返す行終端
    queued_row_end: Option<u32>,
    cache: HashMap<CellAddress, CellValue>,
    /// ストリームが最後にデコードしたセルのアドレス
    last_scanned: Option<CellAddress>,
    null_policy: NullPolicy,
    reads_started: bool,
    current: Option<(CellAddress, CellValue)>,
    last_emitted: Option<CellAddress>,
    /// `ReadAllNulls`で期待アドレスより先にあった実セル
    lookahead: Option<(CellAddress, CellValue)>,
}

impl<R: BufRead> std::fmt::Debug for SheetReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetReader")
            .field("date_system", &self.date_system)
            .field("dimension", &self.dimension)
            .field("null_policy", &self.null_policy)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> SheetReader<R> {
    /// ワークシートのストリームからカーソルを生成
    ///
    /// `<dimension>`要素（なければ`<sheetData>`の開始）まで読み進めます。
    /// ディメンションが宣言されていない場合は`A1`のみとみなします。
    pub(crate) fn new(
        source: R,
        shared_strings: SharedStringIndex<R>,
        styles: StyleDateIndex<R>,
        date_system: DateSystem,
    ) -> Result<Self, XlsxReaderError> {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(false);

        let mut sheet = Self {
            reader,
            buf: Vec::new(),
            shared_strings,
            styles,
            date_system,
            dimension: WorksheetDimension::default(),
            state: CursorState::DimensionKnown,
            row_state: RowState::BeforeRow,
            current_row_number: None,
            previous_row_number: None,
            next_column: 1,
            queued_row_end: None,
            cache: HashMap::new(),
            last_scanned: None,
            null_policy: NullPolicy::default(),
            reads_started: false,
            current: None,
            last_emitted: None,
            lookahead: None,
        };

        loop {
            match sheet.read_tag()? {
                Tag::Dimension(reference) => {
                    match WorksheetDimension::parse(&reference) {
                        Ok(dimension) => sheet.dimension = dimension,
                        Err(_) => log::warn!(
                            "ignoring malformed dimension '{}', assuming A1",
                            reference
                        ),
                    }
                    break;
                }
                Tag::SheetDataStart => break,
                Tag::SheetDataEnd | Tag::Eof => {
                    sheet.state = CursorState::Exhausted;
                    break;
                }
                _ => {}
            }
        }

        log::debug!("worksheet dimension {}", sheet.dimension);
        Ok(sheet)
    }

    /// ワークシートのディメンション
    pub fn dimension(&self) -> WorksheetDimension {
        self.dimension
    }

    /// 逐次読み込みの空セルの扱いを設定
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 設定に成功した場合
    /// * `Err(XlsxReaderError::Config)` - 既に`read_next`/`read_next_in_row`を呼んでいた場合
    pub fn set_null_policy(&mut self, policy: NullPolicy) -> Result<(), XlsxReaderError> {
        if self.reads_started && policy != self.null_policy {
            return Err(XlsxReaderError::Config(
                "the null policy cannot be changed after reading has started".to_string(),
            ));
        }
        self.null_policy = policy;
        Ok(())
    }

    /// 現在の空セルの扱い
    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    /// シリアル値の日付システムを上書き
    ///
    /// 通常はワークブックの`date1904`設定が使われます。変更は以降にデコードされる
    /// セルにのみ適用されます。
    pub fn set_date_system(&mut self, date_system: DateSystem) {
        self.date_system = date_system;
    }

    /// 直前の逐次読み込みで返されたセルのアドレス
    pub fn address(&self) -> Option<CellAddress> {
        self.current.as_ref().map(|(address, _)| *address)
    }

    /// 直前の逐次読み込みで返されたセルの値
    pub fn value(&self) -> Option<&CellValue> {
        self.current.as_ref().map(|(_, value)| value)
    }

    /// ストリームが最後に入った行の行番号
    pub fn current_row_number(&self) -> Option<u32> {
        self.current_row_number
    }

    /// `current_row_number`の1つ前に入った行の行番号
    pub fn previous_row_number(&self) -> Option<u32> {
        self.previous_row_number
    }

    /// 指定されたアドレスのセル値を取得
    ///
    /// # 引数
    ///
    /// * `address` - `"C3"`、`CellAddress`、`(行, 列)`、`("C", 行)`のいずれか
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellValue)` - セル値（セルが存在しない場合は`CellValue::Null`）
    /// * `Err(XlsxReaderError::MalformedAddress)` - アドレスが不正な場合
    /// * `Err(XlsxReaderError::OutOfRange)` - ディメンション外の場合
    pub fn get<A: ToCellAddress>(&mut self, address: A) -> Result<CellValue, XlsxReaderError> {
        let target = address.to_cell_address()?;
        self.ensure_in_dimension(&target)?;

        if let Some(value) = self.cache.get(&target) {
            return Ok(value.clone());
        }
        if self.has_passed(&target) {
            self.cache.insert(target, CellValue::Null);
            return Ok(CellValue::Null);
        }

        while let Some(event) = self.advance()? {
            match event {
                ScanEvent::Cell(address, value) => {
                    if address == target {
                        return Ok(value);
                    }
                    if address > target {
                        break;
                    }
                }
                ScanEvent::RowStart(row) if row > target.row() => break,
                ScanEvent::RowEnd(row) if row >= target.row() => break,
                _ => {}
            }
        }

        self.cache.insert(target, CellValue::Null);
        Ok(CellValue::Null)
    }

    /// 指定されたアドレスに非nullの値があるかを判定
    ///
    /// ディメンション外のアドレスは`false`です。
    pub fn contains_key<A: ToCellAddress>(&mut self, address: A) -> Result<bool, XlsxReaderError> {
        let target = address.to_cell_address()?;
        if !self.dimension.contains(&target) {
            return Ok(false);
        }
        Ok(!self.get(target)?.is_null())
    }

    /// 次のセルに進む
    ///
    /// # 戻り値
    ///
    /// * `Ok(true)` - 次のセルに進んだ場合（`address()`/`value()`で参照可能）
    /// * `Ok(false)` - ワークシートの終端に達した場合
    pub fn read_next(&mut self) -> Result<bool, XlsxReaderError> {
        self.reads_started = true;
        if self.null_policy == NullPolicy::ReadAllNulls {
            return self.read_next_all_nulls(false);
        }

        while let Some(event) = self.advance()? {
            if let ScanEvent::Cell(address, value) = event {
                if self.accepts(&value) {
                    self.emit(address, value);
                    return Ok(true);
                }
            }
        }

        self.current = None;
        Ok(false)
    }

    /// 現在の行の中で次のセルに進む
    ///
    /// 次の行には進みません。行の終端に達すると`false`を返し、他の操作で
    /// ストリームが次の行に進むまで`false`を返し続けます。
    /// 生成直後のカーソルでは最初の行に入ります。
    pub fn read_next_in_row(&mut self) -> Result<bool, XlsxReaderError> {
        self.reads_started = true;
        if self.null_policy == NullPolicy::ReadAllNulls {
            return self.read_next_all_nulls(true);
        }

        if self.row_state == RowState::AfterRow {
            self.current = None;
            return Ok(false);
        }

        while let Some(event) = self.advance()? {
            match event {
                ScanEvent::Cell(address, value) => {
                    if self.accepts(&value) {
                        self.emit(address, value);
                        return Ok(true);
                    }
                }
                ScanEvent::RowEnd(_) => break,
                ScanEvent::RowStart(_) => {}
            }
        }

        self.current = None;
        Ok(false)
    }

    /// 行のセル値を列の昇順で列挙
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellValues)` - ディメンションの列範囲を走査するイテレーター
    /// * `Err(XlsxReaderError::OutOfRange)` - 行番号がディメンション外の場合
    pub fn row(&mut self, row: u32) -> Result<CellValues<'_, R>, XlsxReaderError> {
        if row < self.dimension.min_row() || row > self.dimension.max_row() {
            return Err(self.out_of_range(format!("row {}", row)));
        }
        let first = CellAddress::new(row, self.dimension.min_column())?;
        let last = CellAddress::new(row, self.dimension.max_column())?;
        Ok(self.values(CellAddress::range(first, last).iter()))
    }

    /// 列のセル値を行の昇順で列挙
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellValues)` - ディメンションの行範囲を走査するイテレーター
    /// * `Err(XlsxReaderError::OutOfRange)` - 列番号がディメンション外の場合
    pub fn column(&mut self, column: u32) -> Result<CellValues<'_, R>, XlsxReaderError> {
        if column < self.dimension.min_column() || column > self.dimension.max_column() {
            return Err(self.out_of_range(format!("column {}", column)));
        }
        let first = CellAddress::new(self.dimension.min_row(), column)?;
        let last = CellAddress::new(self.dimension.max_row(), column)?;
        Ok(self.values(CellAddress::range(first, last).iter()))
    }

    /// 列名（例: "C"）で指定した列のセル値を列挙
    pub fn column_by_name(&mut self, letters: &str) -> Result<CellValues<'_, R>, XlsxReaderError> {
        let column = column_name_to_number(letters)?;
        self.column(column)
    }

    /// 範囲内のセル値を行優先順で列挙
    ///
    /// 左上・右下ともディメンション内である必要があります。
    /// 左上が右下を越えている場合は空のイテレーターを返します。
    pub fn range<A: ToCellAddress, B: ToCellAddress>(
        &mut self,
        top_left: A,
        bottom_right: B,
    ) -> Result<CellValues<'_, R>, XlsxReaderError> {
        let top_left = top_left.to_cell_address()?;
        let bottom_right = bottom_right.to_cell_address()?;
        self.ensure_in_dimension(&top_left)?;
        self.ensure_in_dimension(&bottom_right)?;
        Ok(self.values(CellAddress::range(top_left, bottom_right).iter()))
    }

    /// ストリームが既にアドレスを通り過ぎているか
    ///
    /// 最後にデコードしたセル以前、入った行より前の行、終端に達した行のいずれかです。
    fn has_passed(&self, target: &CellAddress) -> bool {
        if self.state == CursorState::Exhausted {
            return true;
        }
        if self.last_scanned.map_or(false, |last| *target <= last) {
            return true;
        }
        match self.current_row_number {
            Some(row) if target.row() < row => true,
            Some(row) if target.row() == row => self.row_state == RowState::AfterRow,
            _ => false,
        }
    }

    fn values(&mut self, cells: CellRangeIter) -> CellValues<'_, R> {
        CellValues {
            sheet: self,
            cells,
        }
    }

    fn ensure_in_dimension(&self, address: &CellAddress) -> Result<(), XlsxReaderError> {
        if self.dimension.contains(address) {
            Ok(())
        } else {
            Err(self.out_of_range(address.to_string()))
        }
    }

    fn out_of_range(&self, requested: String) -> XlsxReaderError {
        XlsxReaderError::OutOfRange {
            requested,
            dimension: self.dimension.to_string(),
        }
    }

    /// 逐次読み込みで返すセルかどうか（`ReadAllNulls`以外）
    fn accepts(&self, value: &CellValue) -> bool {
        match self.null_policy {
            NullPolicy::SkipNulls => !value.is_null(),
            _ => true,
        }
    }

    fn emit(&mut self, address: CellAddress, value: CellValue) {
        self.last_emitted = Some(address);
        self.current = Some((address, value));
    }

    /// `ReadAllNulls`での逐次読み込み
    ///
    /// ディメンション内のアドレスを行優先で1つずつ返します。XMLに存在しない
    /// アドレスはキャッシュの値（なければ`CellValue::Null`）で補います。
    fn read_next_all_nulls(&mut self, within_row: bool) -> Result<bool, XlsxReaderError> {
        let dimension = self.dimension;
        let expected = match self.last_emitted {
            None => dimension.top_left,
            Some(last) => {
                let next = match last.next_adjacent(dimension.min_column(), dimension.max_column())
                {
                    Some(next) => next,
                    None => {
                        self.current = None;
                        return Ok(false);
                    }
                };
                if within_row && next.row() != last.row() {
                    self.current = None;
                    return Ok(false);
                }
                next
            }
        };
        if expected.row() > dimension.max_row() {
            self.current = None;
            return Ok(false);
        }

        // 期待アドレス以降にある最初の実セルを先読みする
        loop {
            let discard = match &self.lookahead {
                Some((address, _)) => *address < expected || !dimension.contains(address),
                None => false,
            };
            if discard {
                self.lookahead = None;
            }
            if self.lookahead.is_some() {
                break;
            }
            match self.advance()? {
                Some(ScanEvent::Cell(address, value)) => self.lookahead = Some((address, value)),
                Some(_) => {}
                None => break,
            }
        }

        let value = match self.lookahead.take() {
            Some((address, value)) if address == expected => value,
            pending => {
                self.lookahead = pending;
                let value = self.cache.get(&expected).cloned().unwrap_or_default();
                self.cache.entry(expected).or_insert_with(|| value.clone());
                value
            }
        };

        self.emit(expected, value);
        Ok(true)
    }

    /// 次の構造イベントまでストリームを進める
    ///
    /// デコードしたセルはすべてキャッシュに記録します。
    fn advance(&mut self) -> Result<Option<ScanEvent>, XlsxReaderError> {
        if let Some(row) = self.queued_row_end.take() {
            self.row_state = RowState::AfterRow;
            return Ok(Some(ScanEvent::RowEnd(row)));
        }
        if self.state == CursorState::Exhausted {
            return Ok(None);
        }
        self.state = CursorState::Streaming;

        loop {
            match self.read_tag()? {
                Tag::Row { number, empty } => {
                    let row = match number {
                        Some(row) => row,
                        None => self.current_row_number.map_or(1, |r| r.saturating_add(1)),
                    };
                    self.previous_row_number = self.current_row_number;
                    self.current_row_number = Some(row);
                    self.next_column = 1;
                    self.row_state = RowState::InRow;
                    if empty {
                        self.queued_row_end = Some(row);
                    }
                    return Ok(Some(ScanEvent::RowStart(row)));
                }
                Tag::RowEnd => {
                    let row = self.current_row_number.unwrap_or(1);
                    self.row_state = RowState::AfterRow;
                    return Ok(Some(ScanEvent::RowEnd(row)));
                }
                Tag::Cell { attrs, empty } => {
                    let address = self.cell_address(attrs.reference.as_deref())?;
                    self.next_column = address.column().saturating_add(1);
                    self.last_scanned = Some(address);
                    let payload = if empty {
                        CellPayload::default()
                    } else {
                        self.read_cell_payload()?
                    };
                    let value = self
                        .decode(&attrs, payload)
                        .map_err(|e| with_address(e, address))?;
                    self.cache.entry(address).or_insert_with(|| value.clone());
                    return Ok(Some(ScanEvent::Cell(address, value)));
                }
                Tag::SheetDataEnd | Tag::Eof => {
                    self.state = CursorState::Exhausted;
                    if self.row_state == RowState::InRow {
                        self.row_state = RowState::AfterRow;
                    }
                    log::debug!("worksheet exhausted with {} cached cells", self.cache.len());
                    return Ok(None);
                }
                Tag::Dimension(_) | Tag::SheetDataStart | Tag::Other => {}
            }
        }
    }

    /// `r`属性、または行内の位置からセルのアドレスを決定
    fn cell_address(&self, reference: Option<&str>) -> Result<CellAddress, XlsxReaderError> {
        match reference {
            Some(reference) => CellAddress::parse(reference),
            None => CellAddress::new(self.current_row_number.unwrap_or(1), self.next_column),
        }
    }

    /// セル値をデコード
    fn decode(
        &mut self,
        attrs: &CellAttrs,
        payload: CellPayload,
    ) -> Result<CellValue, XlsxReaderError> {
        let cell_type = attrs.cell_type.as_deref().unwrap_or("n");
        let raw = match cell_type {
            "inlineStr" => payload.inline.or(payload.value),
            _ => payload.value,
        };
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(CellValue::Null),
        };

        match cell_type {
            "s" => {
                let id: usize = raw.trim().parse()?;
                Ok(CellValue::Text(self.shared_strings.resolve(id)?.to_string()))
            }
            "str" | "e" | "inlineStr" => Ok(CellValue::Text(raw)),
            "b" => Ok(CellValue::Boolean(raw.trim() == "1")),
            "d" => Ok(CellValue::DateTime(parse_iso_datetime(&raw)?)),
            _ => {
                if raw.starts_with('#') {
                    return Ok(CellValue::Text(raw));
                }
                let number: f64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| XlsxReaderError::InvalidCellValue {
                            address: String::new(),
                            message: format!("'{}' is not a number", raw),
                        })?;
                let is_date = match attrs.style {
                    Some(style) => self.styles.is_date_style(style)?,
                    None => false,
                };
                if is_date {
                    Ok(CellValue::DateTime(serial_to_datetime(
                        number,
                        self.date_system,
                    )?))
                } else {
                    Ok(CellValue::Number(number))
                }
            }
        }
    }

    /// 次のタグを読み取る
    fn read_tag(&mut self) -> Result<Tag, XlsxReaderError> {
        self.buf.clear();
        let tag = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => element_tag(&e, false)?,
            Event::Empty(e) => match element_tag(&e, true)? {
                // <sheetData/>は開始と同時に終端
                Tag::SheetDataStart => Tag::SheetDataEnd,
                tag => tag,
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => Tag::RowEnd,
                b"sheetData" => Tag::SheetDataEnd,
                _ => Tag::Other,
            },
            Event::Eof => Tag::Eof,
            _ => Tag::Other,
        };
        Ok(tag)
    }

    /// `<c>`要素の内容を`</c>`まで読み取る
    ///
    /// 数式（`<f>`）は読み飛ばします。
    fn read_cell_payload(&mut self) -> Result<CellPayload, XlsxReaderError> {
        let mut payload = CellPayload::default();
        let mut target = PayloadTarget::None;
        let mut in_phonetic = false;

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"v" => {
                        target = PayloadTarget::Value;
                        payload.value.get_or_insert_with(String::new);
                    }
                    b"is" => {
                        payload.inline.get_or_insert_with(String::new);
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if !in_phonetic => target = PayloadTarget::Inline,
                    _ => {}
                },
                Event::Text(e) => {
                    let text = e.unescape()?;
                    push_payload(&mut payload, target, &text);
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)?;
                    push_payload(&mut payload, target, text);
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"c" => return Ok(payload),
                    b"v" | b"t" => target = PayloadTarget::None,
                    b"rPh" => in_phonetic = false,
                    _ => {}
                },
                Event::Eof => {
                    return Err(XlsxReaderError::InvalidFormat(
                        "worksheet ended inside a cell element".to_string(),
                    ))
                }
                _ => {}
            }
        }
    }
}

fn push_payload(payload: &mut CellPayload, target: PayloadTarget, text: &str) {
    match target {
        PayloadTarget::Value => payload.value.get_or_insert_with(String::new).push_str(text),
        PayloadTarget::Inline => payload.inline.get_or_insert_with(String::new).push_str(text),
        PayloadTarget::None => {}
    }
}

/// 開始タグ・空タグを所有型のタグに変換
fn element_tag(element: &BytesStart<'_>, empty: bool) -> Result<Tag, XlsxReaderError> {
    let tag = match element.local_name().as_ref() {
        b"dimension" => {
            let mut reference = None;
            for attr in element.attributes() {
                let attr = attr.map_err(XlsxReaderError::attr)?;
                if attr.key.local_name().as_ref() == b"ref" {
                    reference = Some(std::str::from_utf8(&attr.value)?.trim().to_string());
                }
            }
            match reference {
                Some(reference) => Tag::Dimension(reference),
                None => Tag::Other,
            }
        }
        b"sheetData" => Tag::SheetDataStart,
        b"row" => {
            let mut number = None;
            for attr in element.attributes() {
                let attr = attr.map_err(XlsxReaderError::attr)?;
                if attr.key.local_name().as_ref() == b"r" {
                    number = Some(std::str::from_utf8(&attr.value)?.trim().parse()?);
                }
            }
            Tag::Row { number, empty }
        }
        b"c" => {
            let mut attrs = CellAttrs::default();
            for attr in element.attributes() {
                let attr = attr.map_err(XlsxReaderError::attr)?;
                let value = std::str::from_utf8(&attr.value)?.trim();
                match attr.key.local_name().as_ref() {
                    b"r" => attrs.reference = Some(value.to_string()),
                    b"s" => attrs.style = Some(value.parse()?),
                    b"t" => attrs.cell_type = Some(value.to_string()),
                    _ => {}
                }
            }
            Tag::Cell { attrs, empty }
        }
        _ => Tag::Other,
    };
    Ok(tag)
}

/// セル値のデコードエラーにアドレスを補う
fn with_address(err: XlsxReaderError, address: CellAddress) -> XlsxReaderError {
    match err {
        XlsxReaderError::InvalidCellValue { message, .. } => XlsxReaderError::InvalidCellValue {
            address: address.to_string(),
            message,
        },
        other => other,
    }
}

/// `SheetReader::row()`などが返すセル値のイテレーター
///
/// 要素ごとに`SheetReader::get()`を呼び出すため、必要な分だけストリームを進めます。
pub struct CellValues<'a, R: BufRead = EntryStream> {
    sheet: &'a mut SheetReader<R>,
    cells: CellRangeIter,
}

impl<R: BufRead> Iterator for CellValues<'_, R> {
    type Item = Result<CellValue, XlsxReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let address = self.cells.next()?;
        Some(self.sheet.get(address))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}
