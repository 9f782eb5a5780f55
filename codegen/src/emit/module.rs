//! Generated Rust module: the lookup maps as `phf::Map` literals, the
//! category ordering and label tables, and a memoized per-skin category
//! lookup. The emitted file is compiled by the consuming crate, which
//! has `phf` as a dependency.

use crate::data::{CategoryTable, SKIN_TONE_LABELS};
use crate::index::EmojiIndex;

const HEADER: &str = "\
// Generated by emoji-gen. DO NOT EDIT.
//
// Requires the `phf` crate in the consuming crate's dependencies.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
";

const SKIN_LOOKUP_FN: &str = r#"
/// Per-category emoji indices for one skin tone: the no-skin lists merged
/// with that tone's lists. Merged once per tag, then served from a cache.
pub fn emoji_indices_by_skin(skin: &str) -> &'static HashMap<&'static str, Vec<usize>> {
    static CACHE: OnceLock<Mutex<HashMap<String, &'static HashMap<&'static str, Vec<usize>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap();
    if let Some(&merged) = cache.get(skin) {
        return merged;
    }

    let mut merged: HashMap<&'static str, Vec<usize>> = HashMap::new();
    for (&category, &indices) in EMOJI_INDICES_BY_CATEGORY_NO_SKIN.entries() {
        merged.entry(category).or_default().extend_from_slice(indices);
    }
    for (&key, &indices) in EMOJI_INDICES_BY_CATEGORY_AND_SKIN.entries() {
        let rest = match key.strip_prefix(skin) {
            Some(rest) => rest,
            None => continue,
        };
        if let Some(category) = rest.strip_prefix('/') {
            merged.entry(category).or_default().extend_from_slice(indices);
        }
    }
    for indices in merged.values_mut() {
        indices.sort_unstable();
    }

    let merged: &'static _ = Box::leak(Box::new(merged));
    cache.insert(skin.to_owned(), merged);
    merged
}
"#;

pub fn render(index: &EmojiIndex, categories: &CategoryTable) -> String {
    let mut out = String::with_capacity(64 * 1024);
    out.push_str(HEADER);

    // phf_codegen output is deterministic for a fixed entry order, so
    // every map is fed its entries sorted by key.

    let mut aliases: Vec<(&str, usize)> = index
        .alias_to_index
        .iter()
        .map(|(alias, &i)| (alias.as_str(), i))
        .collect();
    aliases.sort_unstable();
    let mut map = phf_codegen::Map::new();
    for (alias, i) in aliases {
        map.entry(alias, &i.to_string());
    }
    out.push_str(&format!(
        "\npub static EMOJI_INDEX_BY_ALIAS: phf::Map<&'static str, usize> = {};\n",
        map.build()
    ));

    let mut codepoints: Vec<(&str, usize)> = index
        .unicode_to_index
        .iter()
        .map(|(cp, &i)| (cp.as_str(), i))
        .collect();
    codepoints.sort_unstable();
    let mut map = phf_codegen::Map::new();
    for (cp, i) in codepoints {
        map.entry(cp, &i.to_string());
    }
    out.push_str(&format!(
        "\npub static EMOJI_INDEX_BY_UNICODE: phf::Map<&'static str, usize> = {};\n",
        map.build()
    ));

    out.push_str(&render_index_map(
        "EMOJI_INDICES_BY_CATEGORY",
        index
            .by_category
            .iter()
            .map(|(category, indices)| (category.clone(), indices)),
    ));
    out.push_str(&render_index_map(
        "EMOJI_INDICES_BY_CATEGORY_NO_SKIN",
        index
            .by_category_no_skin
            .iter()
            .map(|(category, indices)| (category.clone(), indices)),
    ));
    out.push_str(&render_index_map(
        "EMOJI_INDICES_BY_CATEGORY_AND_SKIN",
        index
            .by_skin_category
            .iter()
            .map(|((skin, category), indices)| (format!("{}/{}", skin, category), indices)),
    ));

    let names = categories.names();
    out.push_str(&format!(
        "\npub static CATEGORY_NAMES: [&str; {}] = [\n",
        names.len()
    ));
    for name in &names {
        out.push_str(&format!("    {:?},\n", name));
    }
    out.push_str("];\n");

    let mut map = phf_codegen::Map::new();
    let labels = categories.labels();
    for (key, label) in &labels {
        map.entry(key.as_str(), &format!("{:?}", label));
    }
    out.push_str(&format!(
        "\npub static CATEGORY_LABELS: phf::Map<&'static str, &'static str> = {};\n",
        map.build()
    ));

    let mut map = phf_codegen::Map::new();
    for (tag, label) in &SKIN_TONE_LABELS {
        map.entry(*tag, &format!("{:?}", label));
    }
    out.push_str(&format!(
        "\npub static SKIN_TONE_LABELS: phf::Map<&'static str, &'static str> = {};\n",
        map.build()
    ));

    out.push_str(SKIN_LOOKUP_FN);
    out
}

fn render_index_map<'a, I>(name: &str, entries: I) -> String
where
    I: Iterator<Item = (String, &'a Vec<usize>)>,
{
    let mut entries: Vec<(String, &Vec<usize>)> = entries.collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    let mut map = phf_codegen::Map::new();
    for (key, indices) in &entries {
        map.entry(key.as_str(), &format!("&{:?}", indices));
    }
    format!(
        "\npub static {}: phf::Map<&'static str, &'static [usize]> = {};\n",
        name,
        map.build()
    )
}
