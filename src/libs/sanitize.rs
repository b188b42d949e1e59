//! Description cleanup for CSV export and structured listings.
//!
//! Paymo stores entry descriptions as HTML fragments. Exports strip the
//! markup and decode entities so the CSV carries plain text.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn numeric_entity_pattern() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap())
}

/// Decodes the named entities the provider actually emits plus numeric
/// character references. `&amp;` is decoded last so already-decoded
/// sequences are not double-expanded.
fn decode_entities(text: &str) -> String {
    let text = numeric_entity_pattern()
        .replace_all(text, |caps: &regex::Captures| {
            let body = &caps[1];
            let code = if let Some(hex) = body.strip_prefix('x') {
                u32::from_str_radix(hex, 16).ok()
            } else {
                body.parse::<u32>().ok()
            };
            code.and_then(char::from_u32).map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Strips HTML tags, decodes entities, and trims whitespace.
pub fn clean_description(raw: &str) -> String {
    let without_tags = tag_pattern().replace_all(raw, "");
    decode_entities(&without_tags).trim().to_string()
}
