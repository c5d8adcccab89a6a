// SPDX-License-Identifier: GPL-3.0-or-later
use caseless::default_case_fold_str;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Substrings of a normalized title that mark a reissue or special release.
pub const EDITION_MARKERS: &[&str] = &[
    "deluxe",
    "remaster",
    "remastered",
    "expanded",
    "anniversary",
    "special edition",
    "bonus track",
    "bonus tracks",
    "super deluxe",
    "tour edition",
    "collector",
    "redux",
];

lazy_static! {
    static ref BRACKETS: Regex = Regex::new(r"[\[\](){}]+").expect("valid bracket regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
    // "Title - Deluxe Edition" or "Title - 2011 Remaster", plus anything after the keyword
    static ref DASHED_EDITION: Regex = Regex::new(
        r"(?i)\s*[-–—]\s*(deluxe|remaster.*|expanded|anniversary|special edition|bonus tracks?).*$"
    )
    .expect("valid dashed edition regex");
    // "Title (Deluxe)" as the last thing in the title
    static ref PARENTHESIZED_EDITION: Regex = Regex::new(
        r"(?i)\s*\((deluxe|remaster.*|expanded|anniversary|special edition|bonus tracks?)\)\s*$"
    )
    .expect("valid parenthesized edition regex");
}

/// Canonical comparison form of a title or name.
///
/// Bracket runs become a space, whitespace collapses, then the result is
/// trimmed, case folded and NFC composed.
pub fn normalize(text: &str) -> String {
    let unbracketed = BRACKETS.replace_all(text, " ");
    let collapsed = WHITESPACE.replace_all(&unbracketed, " ");
    default_case_fold_str(collapsed.trim()).nfc().collect()
}

pub fn detect_edition_marker(title: &str) -> bool {
    let normalized = normalize(title);
    EDITION_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// Remove a trailing edition suffix. Returns the base title and whether
/// anything was removed.
pub fn strip_edition_suffix(title: &str) -> (String, bool) {
    let without_dashed = DASHED_EDITION.replace(title, "");
    let base = PARENTHESIZED_EDITION
        .replace(&without_dashed, "")
        .into_owned();
    let changed = base != title;
    (base, changed)
}
