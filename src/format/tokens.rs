//! FormatToken Module
//!
//! Number Format Stringのセクションをトークン列に分解します。
//! 日付・時刻の判定に必要な粒度のみを扱い、数値書式の詳細は区別しません。

/// フォーマットトークン
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormatToken {
    /// 日付・時刻の書式文字の連続（例: "yyyy" -> ('y', 4)）
    ///
    /// 文字は小文字に正規化されます。
    DatePart(char, usize),

    /// 経過時間（例: "[h]", "[mm]", "[ss]"）
    ElapsedTime(char),

    /// 引用符・エスケープ・パディング・フィルによるリテラル
    Literal(String),

    /// 角括弧で囲まれた指定（色、条件、ロケールなど）
    Bracket(String),

    /// 上記以外の書式文字（"0", "#", ".", "@" など）
    Other(char),
}

impl FormatToken {
    /// トークンが日付・時刻関連かどうかを判定
    pub fn is_datetime(&self) -> bool {
        matches!(self, FormatToken::DatePart(..) | FormatToken::ElapsedTime(_))
    }
}

/// 1セクション分の書式文字列をトークンに分解
///
/// # 引数
///
/// * `section` - `;`で分割済みのセクション文字列
///
/// # 戻り値
///
/// トークン列。閉じられていない引用符・角括弧は末尾までをリテラルとして扱います。
pub(crate) fn tokenize(section: &str) -> Vec<FormatToken> {
    let mut tokens = Vec::new();
    let mut chars = section.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut literal = String::new();
                for c in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                    literal.push(c);
                }
                tokens.push(FormatToken::Literal(literal));
            }
            // 次の1文字はそのまま表示・幅の確保・繰り返しに使われる
            '\\' | '_' | '*' => {
                let next = chars.next().map(String::from).unwrap_or_default();
                tokens.push(FormatToken::Literal(next));
            }
            '[' => {
                let mut content = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    content.push(c);
                }
                tokens.push(bracket_token(content));
            }
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => {
                let lower = ch.to_ascii_lowercase();
                let mut count = 1;
                while chars
                    .peek()
                    .is_some_and(|c| c.to_ascii_lowercase() == lower)
                {
                    chars.next();
                    count += 1;
                }
                tokens.push(FormatToken::DatePart(lower, count));
            }
            _ => tokens.push(FormatToken::Other(ch)),
        }
    }

    tokens
}

/// 角括弧の中身を分類
///
/// `[h]`、`[hh]`、`[m]`、`[mm]`、`[s]`、`[ss]`のように同じ時刻文字だけで
/// 構成される場合は経過時間、それ以外は色や条件などの指定です。
fn bracket_token(content: String) -> FormatToken {
    let mut chars = content.chars().map(|c| c.to_ascii_lowercase());
    if let Some(first) = chars.next() {
        if matches!(first, 'h' | 'm' | 's') && chars.all(|c| c == first) {
            return FormatToken::ElapsedTime(first);
        }
    }
    FormatToken::Bracket(content)
}
