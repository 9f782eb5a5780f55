//! Trimmed JSON output: the record list with only the fields the web
//! application reads. Stripping is done by projection into an
//! output-only type rather than by deleting fields from a loose value.

use crate::index::EmojiIndex;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct TrimmedEmoji<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    unified: Option<&'a str>,
    name: &'a str,
    short_name: &'a str,
    short_names: &'a [String],
    category: &'a str,
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skins: Option<&'a [String]>,
}

pub fn render(index: &EmojiIndex) -> Result<String> {
    let trimmed: Vec<TrimmedEmoji> = index
        .emojis
        .iter()
        .map(|e| TrimmedEmoji {
            unified: e.unified.as_deref(),
            name: &e.name,
            short_name: &e.short_name,
            short_names: &e.short_names,
            category: &e.category,
            image: &e.image,
            skins: e.skins.as_deref(),
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&trimmed)?;
    out.push('\n');
    Ok(out)
}
