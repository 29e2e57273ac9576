//! 檔名/網址安全的 slug 轉換

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

/// 將工業區名稱轉為安全的檔名片段
///
/// 規則：去除前後空白、連續空白換成 `_`、
/// 非（字元類 `\w`、中日韓表意文字、`-`、`_`、`.`）的字元一律換成 `_`
pub fn safe_slug(text: &str) -> String {
    let ws = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    let unsafe_chars = UNSAFE_CHARS
        .get_or_init(|| Regex::new(r"[^\w\x{4e00}-\x{9fff}\-_.]").expect("unsafe-chars regex"));

    let trimmed = text.trim();
    let underscored = ws.replace_all(trimmed, "_");
    unsafe_chars.replace_all(&underscored, "_").into_owned()
}
