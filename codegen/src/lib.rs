//! Generation pipeline for the bundled emoji dataset.
//!
//! The binary feeds the embedded metadata tables through
//! [`build_index`], then hands the resulting [`index::EmojiIndex`] to the
//! serializers in [`emit`].

pub mod data;
pub mod emit;
pub mod expand;
pub mod index;

use ahash::AHashSet;
use anyhow::Result;

/// Runs the in-memory half of the pipeline: load, filter, expand,
/// augment, inject the custom entry, sort and index.
///
/// `excluded` holds short names whose emoji (and any skin variants they
/// would have produced) are dropped from every artifact.
pub fn build_index(
    emoji_json: &str,
    categories_json: &str,
    excluded: &AHashSet<String>,
) -> Result<(index::EmojiIndex, data::CategoryTable)> {
    let (emojis, categories) = data::load_dataset(emoji_json, categories_json)?;

    let emojis = data::filter_excluded(emojis, excluded);
    let mut emojis = expand::expand_skin_variations(emojis);
    expand::augment_aliases(&mut emojis);
    emojis.push(expand::custom_entry());

    Ok((
        index::EmojiIndex::build(emojis),
        data::CategoryTable::new(categories),
    ))
}
