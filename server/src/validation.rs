//! Item name normalization and validation.
//!
//! Names are trimmed, must be non-empty, at most 100 characters, and may only
//! contain kana, CJK ideographs, word characters, whitespace, `,`, `.` and `-`.
//! Messages are user-facing and in Japanese.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MAX_NAME_CHARS: usize = 100;

/// Message when the create body is missing or has no `name`.
pub const NAME_REQUIRED: &str = "商品名は必須です";

/// Message when the update body is missing or not a JSON object.
pub const UPDATE_BODY_REQUIRED: &str = "更新データが必要です";

/// Hiragana, Katakana, CJK Unified Ideographs, `\w`, `\s`, comma, period, hyphen.
///
/// `\w` and `\s` use the regex crate's Unicode classes, which are narrower
/// than Python's: `½` and other `No` numerals are not word characters, and
/// the separators `\x1c`-`\x1f` are neither whitespace here nor trimmed by
/// `str::trim`. Such names are rejected as invalid characters.
static ALLOWED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FFF}\w\s,.\-]*$")
        .expect("item name pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("商品名は空にできません")]
    Empty,
    #[error("商品名は100文字以内にしてください")]
    TooLong,
    #[error("商品名に使用できない文字が含まれています")]
    InvalidCharacters,
}

/// Check length and character set of an already trimmed name.
pub fn validate_item_name(name: &str) -> Result<(), NameError> {
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong);
    }
    if !ALLOWED_NAME.is_match(name) {
        return Err(NameError::InvalidCharacters);
    }
    Ok(())
}

/// Trim `raw` and validate it, returning the name to store.
pub fn normalize_item_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    validate_item_name(name)?;
    Ok(name.to_string())
}
