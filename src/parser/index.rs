//! Forward Index Module
//!
//! XMLストリームを前方向にのみ読み進め、読み取ったレコードをIDの昇順で
//! メモ化する遅延インデックスの共通実装を提供します。
//!
//! 要求されたIDに到達するまでだけストリームを進めるため、
//! 巨大な共有文字列テーブルでも先頭付近の参照は即座に解決されます。

use crate::error::XlsxReaderError;

/// レコードを1件ずつ取り出すスキャナー
pub(crate) trait EntryScanner {
    /// レコードの型
    type Entry;

    /// インデックスの名前（エラーメッセージ用）
    const INDEX_NAME: &'static str;

    /// 次のレコードを読み取る
    ///
    /// # 戻り値
    ///
    /// * `Ok(Some(entry))` - 次のレコード
    /// * `Ok(None)` - ストリームの終端
    fn next_entry(&mut self) -> Result<Option<Self::Entry>, XlsxReaderError>;
}

/// 前方向のみの遅延インデックス
///
/// レコードは文書順に0から採番され、一度読み取ったレコードは再読み込みしません。
pub(crate) struct ForwardIndex<S: EntryScanner> {
    scanner: S,
    memo: Vec<S::Entry>,
    exhausted: bool,
}

impl<S: EntryScanner> ForwardIndex<S> {
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            memo: Vec::new(),
            exhausted: false,
        }
    }

    /// レコードを1件読み進める
    ///
    /// # 戻り値
    ///
    /// 新しいレコードをメモに追加した場合は`true`、終端に達していた場合は`false`
    fn advance(&mut self) -> Result<bool, XlsxReaderError> {
        if self.exhausted {
            return Ok(false);
        }
        match self.scanner.next_entry()? {
            Some(entry) => {
                self.memo.push(entry);
                log::trace!("{}: memoized entry {}", S::INDEX_NAME, self.memo.len() - 1);
                Ok(true)
            }
            None => {
                self.exhausted = true;
                log::debug!(
                    "{}: stream exhausted after {} entries",
                    S::INDEX_NAME,
                    self.memo.len()
                );
                Ok(false)
            }
        }
    }

    /// IDに対応するレコードを取得
    ///
    /// 未読の場合は、そのIDに到達するまでストリームを進めます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(&entry)` - レコード
    /// * `Err(XlsxReaderError::KeyNotFound)` - IDに到達する前にストリームが終端した場合
    pub fn resolve(&mut self, id: usize) -> Result<&S::Entry, XlsxReaderError> {
        while self.memo.len() <= id {
            if !self.advance()? {
                return Err(XlsxReaderError::KeyNotFound {
                    index: S::INDEX_NAME,
                    key: id,
                });
            }
        }
        Ok(&self.memo[id])
    }

    /// 条件を満たす最初のレコードのIDを取得
    ///
    /// メモ化済みのレコードを先に調べ、見つからなければストリームを読み進めます。
    pub fn first_matching<F>(&mut self, predicate: F) -> Result<Option<usize>, XlsxReaderError>
    where
        F: Fn(&S::Entry) -> bool,
    {
        if let Some(id) = self.memo.iter().position(&predicate) {
            return Ok(Some(id));
        }
        while self.advance()? {
            let id = self.memo.len() - 1;
            if predicate(&self.memo[id]) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// メモ化済みのレコード数
    #[cfg(test)]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}
