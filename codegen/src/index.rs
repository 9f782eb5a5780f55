//! Sorting and lookup-map construction.
//!
//! Everything the serializers need is collected into one [`EmojiIndex`]
//! value. It is built single-threaded, handed to the emitters read-only,
//! and never mutated afterwards.

use crate::data::{self, Emoji};
use ahash::AHashMap;

/// Edge length of one sprite tile in pixels.
pub const SPRITE_TILE: u32 = 64;
/// Tile plus one pixel of padding on each side.
const SPRITE_TILE_PADDED: u32 = SPRITE_TILE + 2;

#[derive(Debug)]
pub struct EmojiIndex {
    /// All records, sorted by sort key, categories normalized. Index
    /// positions in the maps below refer to this list and are final.
    pub emojis: Vec<Emoji>,
    /// Every alias of every record. Duplicate aliases across records keep
    /// last-write-wins semantics; no dedup pass runs.
    pub alias_to_index: AHashMap<String, usize>,
    /// Lowercased unified codepoint → index, for records that have one.
    pub unicode_to_index: AHashMap<String, usize>,
    pub by_category: AHashMap<String, Vec<usize>>,
    /// Keyed by (skin tag, category). Records synthesized by expansion
    /// register under their first tag; bases that still carry a variation
    /// table register under the `default` sentinel.
    pub by_skin_category: AHashMap<(String, String), Vec<usize>>,
    pub by_category_no_skin: AHashMap<String, Vec<usize>>,
    /// `background-position` value per record, `None` for records without
    /// sheet coordinates (the custom entry).
    pub positions: Vec<Option<String>>,
}

impl EmojiIndex {
    pub fn build(mut emojis: Vec<Emoji>) -> Self {
        // Missing sort keys compare as zero. The stdlib sort is stable,
        // so equal keys keep their pipeline order.
        emojis.sort_by_key(|e| e.sort_order.unwrap_or(0));

        for emoji in &mut emojis {
            emoji.category = data::normalize_category(&emoji.category);
        }

        let mut index = EmojiIndex {
            alias_to_index: AHashMap::with_capacity(emojis.len()),
            unicode_to_index: AHashMap::with_capacity(emojis.len()),
            by_category: AHashMap::new(),
            by_skin_category: AHashMap::new(),
            by_category_no_skin: AHashMap::new(),
            positions: Vec::with_capacity(emojis.len()),
            emojis,
        };

        for (i, emoji) in index.emojis.iter().enumerate() {
            for alias in &emoji.short_names {
                index.alias_to_index.insert(alias.clone(), i);
            }

            if let Some(unified) = &emoji.unified {
                index.unicode_to_index.insert(unified.to_lowercase(), i);
            }

            index
                .by_category
                .entry(emoji.category.clone())
                .or_default()
                .push(i);

            if let Some(skins) = &emoji.skins {
                let tag = skins
                    .first()
                    .map(String::as_str)
                    .unwrap_or(data::DEFAULT_SKIN);
                index
                    .by_skin_category
                    .entry((tag.to_owned(), emoji.category.clone()))
                    .or_default()
                    .push(i);
            } else if !emoji.skin_variations.is_empty() {
                index
                    .by_skin_category
                    .entry((data::DEFAULT_SKIN.to_owned(), emoji.category.clone()))
                    .or_default()
                    .push(i);
            } else {
                index
                    .by_category_no_skin
                    .entry(emoji.category.clone())
                    .or_default()
                    .push(i);
            }

            index.positions.push(match (emoji.sheet_x, emoji.sheet_y) {
                (Some(x), Some(y)) => Some(background_position(x, y)),
                _ => None,
            });
        }

        index
    }
}

/// Pixel offset of a sprite on the sheet. Coordinate 0 comes out as
/// `-0px`; the trailing semicolon is part of the stored value.
fn background_position(sheet_x: u32, sheet_y: u32) -> String {
    format!(
        "-{}px -{}px;",
        sheet_x * SPRITE_TILE_PADDED,
        sheet_y * SPRITE_TILE_PADDED
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_dataset;
    use crate::expand;

    fn sample() -> Vec<Emoji> {
        let (emojis, _) = load_dataset(
            r#"[
                {"name": "WAVING HAND SIGN", "unified": "1F44B", "image": "1f44b.png", "short_names": ["wave"], "category": "People & Body", "sheet_x": 3, "sheet_y": 0, "sort_order": 163,
                 "skin_variations": {"1F3FB": {"unified": "1F44B-1F3FB", "image": "1f44b-1f3fb.png", "sheet_x": 4, "sheet_y": 0}}},
                {"name": "GRINNING FACE", "unified": "1F600", "image": "1f600.png", "short_names": ["grinning"], "category": "Smileys & People", "sheet_x": 0, "sheet_y": 0, "sort_order": 1}
            ]"#,
            "[]",
        )
        .unwrap();
        let mut emojis = expand::expand_skin_variations(emojis);
        emojis.push(expand::custom_entry());
        emojis
    }

    #[test]
    fn missing_sort_key_sorts_as_zero() {
        let index = EmojiIndex::build(sample());
        // The custom entry has no sort key and lands at the front, ahead
        // of every record with a positive key.
        assert_eq!(index.emojis[0].short_name, "logo");
        assert_eq!(index.emojis[1].short_name, "grinning");
        assert_eq!(index.emojis[2].short_name, "wave");
        assert_eq!(index.emojis[3].short_name, "wave_light_skin_tone");
    }

    #[test]
    fn alias_entries_point_at_records_carrying_the_alias() {
        let index = EmojiIndex::build(sample());
        for (alias, &i) in &index.alias_to_index {
            assert!(
                index.emojis[i].short_names.contains(alias),
                "alias {:?} points at record {:?}",
                alias,
                index.emojis[i].short_name
            );
        }
    }

    #[test]
    fn unicode_keys_are_lowercased() {
        let index = EmojiIndex::build(sample());
        let &i = index.unicode_to_index.get("1f44b-1f3fb").unwrap();
        assert_eq!(index.emojis[i].short_name, "wave_light_skin_tone");
        assert!(index.unicode_to_index.get("1F44B-1F3FB").is_none());
    }

    #[test]
    fn skin_registration_buckets() {
        let index = EmojiIndex::build(sample());

        // Base with a variation table registers under the sentinel.
        let default = index
            .by_skin_category
            .get(&("default".to_owned(), "people-body".to_owned()))
            .unwrap();
        assert_eq!(default.len(), 1);
        assert_eq!(index.emojis[default[0]].short_name, "wave");

        // The variant registers under its first tag.
        let light = index
            .by_skin_category
            .get(&("light_skin_tone".to_owned(), "people-body".to_owned()))
            .unwrap();
        assert_eq!(index.emojis[light[0]].short_name, "wave_light_skin_tone");

        // Plain records go to the no-skin list.
        let no_skin = index.by_category_no_skin.get("smileys-people").unwrap();
        assert_eq!(index.emojis[no_skin[0]].short_name, "grinning");

        // Every record is in its category list regardless of skin.
        assert_eq!(index.by_category.get("people-body").unwrap().len(), 2);
    }

    #[test]
    fn sprite_offset_formatting() {
        let index = EmojiIndex::build(sample());
        let &i = index.alias_to_index.get("wave").unwrap();
        assert_eq!(index.positions[i].as_deref(), Some("-198px -0px;"));

        let &i = index.alias_to_index.get("logo").unwrap();
        assert!(index.positions[i].is_none());
    }

    #[test]
    fn categories_are_normalized_in_place() {
        let index = EmojiIndex::build(sample());
        assert!(index.emojis.iter().all(|e| !e.category.contains('&')));
        assert!(index.by_category.contains_key("smileys-people"));
    }
}
