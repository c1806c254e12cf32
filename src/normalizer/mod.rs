//! 成分名正規化モジュール
//!
//! OCRで抽出した成分名と成分表の成分名を、比較可能な正規形に揃える。
//! 照合は常に正規形どうしで行う。

use regex::Regex;

lazy_static::lazy_static! {
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-zA-Z0-9 ]").unwrap();
}

/// 成分名を正規形（小文字・英数字とスペースのみ・前後空白なし）に変換する
///
/// 純粋関数。空文字列も有効な出力なので、照合前に呼び出し側で除外すること。
pub fn canonicalize(raw: &str) -> String {
    let stripped = NON_ALNUM_RE.replace_all(raw, "");
    stripped.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_lowercases_and_trims() {
        assert_eq!(canonicalize("  WATER "), "water");
        assert_eq!(canonicalize("Sodium Chloride"), "sodium chloride");
    }

    #[test]
    fn test_canonicalize_strips_punctuation() {
        assert_eq!(canonicalize("water!"), "water");
        assert_eq!(canonicalize("1,2-Hexanediol"), "12hexanediol");
        assert_eq!(canonicalize("Parfum/Fragrance"), "parfumfragrance");
    }

    #[test]
    fn test_canonicalize_strips_symbols_and_emoji() {
        assert_eq!(canonicalize("• Glycerin ✨"), "glycerin");
        assert_eq!(canonicalize("※注意※"), "");
    }

    #[test]
    fn test_canonicalize_empty_is_valid() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("!!!"), "");
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let inputs = ["  WATER ", "1,2-Hexanediol", "• Glycerin ✨", "", "Aqua (Water)"];
        for input in inputs {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once, "入力: {:?}", input);
        }
    }

    #[test]
    fn test_canonicalize_output_alphabet() {
        let inputs = ["Tocopherol®", "ＷＡＴＥＲ", "水", "CI 77491 (Iron Oxides)"];
        for input in inputs {
            let canonical = canonicalize(input);
            assert!(
                canonical
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
                "不正な文字が残存: {:?} -> {:?}",
                input,
                canonical
            );
        }
    }
}
