//! Shared String Index Module
//!
//! `xl/sharedStrings.xml`の`<si>`要素を遅延的に読み進める共有文字列インデックスを提供します。

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::XlsxReaderError;
use crate::parser::index::{EntryScanner, ForwardIndex};

/// `<si>`要素を1件ずつ読み取るスキャナー
pub(crate) struct SharedStringScanner<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> SharedStringScanner<R> {
    fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        // xml:space="preserve"の空白を保持する
        reader.trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> EntryScanner for SharedStringScanner<R> {
    type Entry = String;
    const INDEX_NAME: &'static str = "shared string table";

    fn next_entry(&mut self) -> Result<Option<String>, XlsxReaderError> {
        let mut text = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        text.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Event::Empty(e) => {
                    if e.local_name().as_ref() == b"si" {
                        return Ok(Some(String::new()));
                    }
                }
                Event::Text(e) if in_t => text.push_str(&e.unescape()?),
                Event::CData(e) if in_t => text.push_str(std::str::from_utf8(&e)?),
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" if in_si => return Ok(Some(text)),
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}

/// 共有文字列ID → 文字列の遅延インデックス
///
/// 各`<si>`要素の文字列は、含まれるすべての`<t>`要素（リッチテキストの`<r>`内を含む）を
/// 連結したものです。書式情報とふりがな（`<rPh>`）は含みません。
pub(crate) struct SharedStringIndex<R: BufRead> {
    index: ForwardIndex<SharedStringScanner<R>>,
}

impl<R: BufRead> SharedStringIndex<R> {
    /// `sharedStrings.xml`のストリームからインデックスを生成
    ///
    /// 空のストリームは空のインデックスとなり、すべての参照が`KeyNotFound`になります。
    pub fn new(source: R) -> Self {
        Self {
            index: ForwardIndex::new(SharedStringScanner::new(source)),
        }
    }

    /// 共有文字列IDを解決
    pub fn resolve(&mut self, id: usize) -> Result<&str, XlsxReaderError> {
        self.index.resolve(id).map(String::as_str)
    }
}
