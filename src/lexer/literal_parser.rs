//! リテラルの解釈
//!
//! 構文木はリテラルを生のテキストのまま保持する。
//! エスケープや基数・サフィックスの解釈は後段のツールがこれらを使って行う。

/// 文字列・文字リテラルのエスケープシーケンスを処理
pub fn unescape(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('0') => result.push('\0'),
            Some('x') => {
                // 16進数エスケープ（\xNN）
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            Some(c) => {
                result.push('\\');
                result.push(c);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// 整数リテラルを値とサフィックスに分解
///
/// `0x`/`0o`/`0b`の基数接頭辞と`_`区切りを受け付ける。
/// 数字の後に続く英字列はサフィックスとして返す（例: `42u8`）。
pub fn parse_integer(text: &str) -> Option<(u128, Option<&str>)> {
    let (radix, body) = match text.get(..2) {
        Some("0x") | Some("0X") => (16, &text[2..]),
        Some("0o") | Some("0O") => (8, &text[2..]),
        Some("0b") | Some("0B") => (2, &text[2..]),
        _ => (10, text),
    };

    let digits_end = body
        .char_indices()
        .find(|(_, c)| *c != '_' && !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    let (digits, suffix) = body.split_at(digits_end);

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    let value = u128::from_str_radix(&digits, radix).ok()?;
    let suffix = if suffix.is_empty() { None } else { Some(suffix) };
    Some((value, suffix))
}
