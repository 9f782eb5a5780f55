//! Generated Go source for the server-side package: one flat literal
//! mapping every alias to its image filename. Keys are emitted sorted so
//! the file is byte-identical across runs.

use crate::index::EmojiIndex;

pub fn render(index: &EmojiIndex) -> String {
    let mut aliases: Vec<(&str, usize)> = index
        .alias_to_index
        .iter()
        .map(|(alias, &i)| (alias.as_str(), i))
        .collect();
    aliases.sort_unstable();

    let mut out = String::with_capacity(32 * 1024);
    out.push_str("// Code generated by emoji-gen. DO NOT EDIT.\n\n");
    out.push_str("package model\n\n");
    out.push_str("var EmojiImageByAlias = map[string]string{\n");
    for (alias, i) in aliases {
        out.push_str(&format!("\t\"{}\": \"{}\",\n", alias, index.emojis[i].image));
    }
    out.push_str("}\n");
    out
}
