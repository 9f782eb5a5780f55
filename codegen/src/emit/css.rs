//! Generated stylesheet: per-category sheet references, one
//! `background-position` rule per sprite, and the fixed presentation
//! classes the web application styles emoji with.

use crate::data::CategoryTable;
use crate::index::EmojiIndex;

const PRESENTATION_RULES: &str = "\
.emoticon {
    background-repeat: no-repeat;
    background-size: contain;
    cursor: default;
    display: inline-block;
    height: 21px;
    vertical-align: middle;
    width: 21px;
}

.emoticon--large {
    height: 32px;
    width: 32px;
}

.emoji-picker__item {
    cursor: pointer;
    height: 22px;
    overflow: hidden;
    width: 22px;
}
";

pub fn render(index: &EmojiIndex, categories: &CategoryTable) -> String {
    let mut out = String::with_capacity(64 * 1024);
    out.push_str("/* Generated by emoji-gen. DO NOT EDIT. */\n\n");

    // recent and custom have no sprite-sheet section.
    for name in categories
        .names()
        .iter()
        .filter(|name| *name != "recent" && *name != "custom")
    {
        out.push_str(&format!(
            ".emoji-category--{} {{\n    background-image: url(\"images/sheet.png\");\n}}\n\n",
            name
        ));
    }

    for (emoji, position) in index.emojis.iter().zip(&index.positions) {
        let position = match position {
            Some(position) => position,
            // The custom entry (and anything else without sheet
            // coordinates) gets no position rule.
            None => continue,
        };
        let stem = emoji.image.strip_suffix(".png").unwrap_or(&emoji.image);
        out.push_str(&format!(
            ".emoji-{} {{\n    background-position: {}\n}}\n\n",
            stem, position
        ));
    }

    out.push_str(PRESENTATION_RULES);
    out
}
