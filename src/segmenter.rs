//! OCRテキストの成分分割モジュール
//!
//! OCRが返す複数行テキストを区切り文字で分割し、
//! 出現順を保った成分候補のリストにする。

/// 成分リストの区切り文字（カンマ・改行・セミコロン・中黒点・ピリオド）
const DELIMITERS: &[char] = &[',', '\n', ';', '•', '.'];

/// 生テキストを成分候補に分割する
///
/// 前後の空白を除去し、空のトークンは捨てる。順序は元テキストの出現順。
pub fn segment(raw_text: &str) -> Vec<String> {
    raw_text
        .split(DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
