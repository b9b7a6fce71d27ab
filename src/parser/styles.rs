//! Style Date Index Module
//!
//! `xl/styles.xml`の`<cellXfs>`を遅延的に読み進め、スタイルIDごとに
//! 日付・時刻書式かどうかを判定するインデックスを提供します。

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::XlsxReaderError;
use crate::format::FormatTable;
use crate::parser::index::{EntryScanner, ForwardIndex};

/// `styles.xml`から`cellXfs`のスタイルレコードを1件ずつ読み取るスキャナー
///
/// `<numFmts>`の定義は`<cellXfs>`より前に現れるため、レコードを判定する時点で
/// カスタム書式はすべて`FormatTable`にマージされています。
pub(crate) struct StyleScanner<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    formats: FormatTable,
    in_cell_xfs: bool,
    finished: bool,
}

impl<R: BufRead> StyleScanner<R> {
    fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            formats: FormatTable::new(),
            in_cell_xfs: false,
            finished: false,
        }
    }
}

/// `numFmt`・`xf`要素の`numFmtId`属性を取得
fn num_fmt_id(
    element: &quick_xml::events::BytesStart<'_>,
) -> Result<Option<u32>, XlsxReaderError> {
    for attr in element.attributes() {
        let attr = attr.map_err(XlsxReaderError::attr)?;
        if attr.key.local_name().as_ref() == b"numFmtId" {
            return Ok(Some(std::str::from_utf8(&attr.value)?.trim().parse()?));
        }
    }
    Ok(None)
}

impl<R: BufRead> EntryScanner for StyleScanner<R> {
    type Entry = bool;
    const INDEX_NAME: &'static str = "style table";

    fn next_entry(&mut self) -> Result<Option<bool>, XlsxReaderError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"cellXfs" => {
                    self.in_cell_xfs = true;
                }
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"numFmt" => {
                        // <numFmt numFmtId="164" formatCode="yyyy/mm/dd"/>
                        let id = num_fmt_id(&e)?;
                        let mut code = None;
                        for attr in e.attributes() {
                            let attr = attr.map_err(XlsxReaderError::attr)?;
                            if attr.key.local_name().as_ref() == b"formatCode" {
                                code = Some(attr.decode_and_unescape_value(&self.reader)?.into_owned());
                            }
                        }
                        if let (Some(id), Some(code)) = (id, code) {
                            let is_date = self.formats.insert_custom(id, &code);
                            log::trace!("numFmt {} '{}' date={}", id, code, is_date);
                        }
                    }
                    b"xf" if self.in_cell_xfs => {
                        let id = num_fmt_id(&e)?.unwrap_or(0);
                        return Ok(Some(self.formats.is_date_format(id)));
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"cellXfs" {
                        self.in_cell_xfs = false;
                        self.finished = true;
                        return Ok(None);
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

/// スタイルID → 日付判定の遅延インデックス
///
/// スタイルIDはセルの`s`属性の値で、`<cellXfs>`内の`<xf>`要素の0始まりの位置です。
/// `<cellStyleXfs>`内の`<xf>`要素は数えません。
pub(crate) struct StyleDateIndex<R: BufRead> {
    index: ForwardIndex<StyleScanner<R>>,
}

impl<R: BufRead> StyleDateIndex<R> {
    /// `styles.xml`のストリームからインデックスを生成
    ///
    /// ストリームはこの時点では読み進めません。空のストリームは空のインデックスになります。
    pub fn new(source: R) -> Self {
        Self {
            index: ForwardIndex::new(StyleScanner::new(source)),
        }
    }

    /// スタイルIDが日付・時刻書式かどうかを判定
    ///
    /// # 戻り値
    ///
    /// * `Ok(bool)` - 判定結果
    /// * `Err(XlsxReaderError::KeyNotFound)` - スタイルIDが`<cellXfs>`のレコード数以上の場合
    pub fn is_date_style(&mut self, style_id: usize) -> Result<bool, XlsxReaderError> {
        self.index.resolve(style_id).copied()
    }

    /// 日付・時刻書式を持つ最初のスタイルID
    pub fn first_date_style_id(&mut self) -> Result<Option<usize>, XlsxReaderError> {
        self.index.first_matching(|is_date| *is_date)
    }
}
