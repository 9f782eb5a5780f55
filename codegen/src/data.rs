//! Dataset schema and static tables.
//!
//! The vendored metadata table carries far more per-record detail than the
//! application needs (per-platform image flags, qualification variants,
//! obsoletion markers). Those fields are dropped by not being part of the
//! schema: [`RawEmoji`] deserializes only what the pipeline looks at.

use ahash::AHashSet;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

/// Codepoint → short-name tag for the five fixed skin tone modifiers.
pub const SKIN_TONES: [(&str, &str); 5] = [
    ("1F3FB", "light_skin_tone"),
    ("1F3FC", "medium_light_skin_tone"),
    ("1F3FD", "medium_skin_tone"),
    ("1F3FE", "medium_dark_skin_tone"),
    ("1F3FF", "dark_skin_tone"),
];

/// Sentinel tag for records that have skin variations but are themselves
/// the untinted base rendering.
pub const DEFAULT_SKIN: &str = "default";

/// Human-readable labels for every skin tag, `default` included.
pub const SKIN_TONE_LABELS: [(&str, &str); 6] = [
    ("default", "Default Skin Tone"),
    ("light_skin_tone", "Light Skin Tone"),
    ("medium_light_skin_tone", "Medium-Light Skin Tone"),
    ("medium_skin_tone", "Medium Skin Tone"),
    ("medium_dark_skin_tone", "Medium-Dark Skin Tone"),
    ("dark_skin_tone", "Dark Skin Tone"),
];

/// Extra legacy short names kept for backward compatibility with markup
/// written against older releases. Keyed by canonical short name, applied
/// after skin expansion.
pub const LEGACY_ALIASES: [(&str, &[&str]); 6] = [
    ("slightly_smiling_face", &["slightly_smiling"]),
    ("thinking_face", &["thinking"]),
    ("upside_down_face", &["upside_down"]),
    ("spock-hand", &["vulcan"]),
    ("drooling_face", &["drool"]),
    ("scream", &["panic"]),
];

/// Tag for a single skin codepoint, or `""` when the codepoint is not one
/// of the five modifiers. The empty tag then flows into the underscore
/// join, which matches what shipped releases have always generated.
pub fn skin_tag(codepoint: &str) -> &'static str {
    SKIN_TONES
        .iter()
        .find(|(cp, _)| *cp == codepoint)
        .map(|(_, tag)| *tag)
        .unwrap_or("")
}

/// Label for a skin tag, `""` for unknown tags.
pub fn skin_label(tag: &str) -> &'static str {
    SKIN_TONE_LABELS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

/// Lowercases a category name and folds separators, so that
/// `Smileys & People` becomes `smileys-people`.
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase().replace(" & ", "-").replace(' ', "-")
}

/// One skin-tinted rendering of a base emoji, keyed in the dataset by one
/// or two `-`-joined modifier codepoints.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinVariation {
    pub unified: String,
    pub image: String,
    pub sheet_x: u32,
    pub sheet_y: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSkinVariation {
    unified: String,
    #[serde(default)]
    image: Option<String>,
    sheet_x: u32,
    sheet_y: u32,
}

impl From<RawSkinVariation> for SkinVariation {
    fn from(raw: RawSkinVariation) -> Self {
        let image = match raw.image {
            Some(image) => image,
            None => image_for_unified(&raw.unified),
        };
        SkinVariation {
            unified: raw.unified,
            image,
            sheet_x: raw.sheet_x,
            sheet_y: raw.sheet_y,
        }
    }
}

/// A working emoji record. Every record has a canonical short name and a
/// non-empty alias list; `image` uniquely identifies a bitmap file.
#[derive(Debug, Clone, PartialEq)]
pub struct Emoji {
    pub unified: Option<String>,
    pub name: String,
    pub short_name: String,
    pub short_names: Vec<String>,
    pub category: String,
    pub image: String,
    pub sort_order: Option<u32>,
    pub sheet_x: Option<u32>,
    pub sheet_y: Option<u32>,
    /// Tags of the tones this record is tinted with; only set on records
    /// synthesized by skin expansion.
    pub skins: Option<Vec<String>>,
    /// BTreeMap so derived records come out in a stable order.
    pub skin_variations: BTreeMap<String, SkinVariation>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEmoji {
    #[serde(default)]
    unified: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    short_names: Vec<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    sort_order: Option<u32>,
    #[serde(default)]
    sheet_x: Option<u32>,
    #[serde(default)]
    sheet_y: Option<u32>,
    #[serde(default)]
    skin_variations: BTreeMap<String, RawSkinVariation>,
}

impl TryFrom<RawEmoji> for Emoji {
    type Error = anyhow::Error;

    fn try_from(raw: RawEmoji) -> Result<Self> {
        let mut short_names = raw.short_names;
        let short_name = match raw.short_name {
            Some(name) => {
                if !short_names.contains(&name) {
                    short_names.insert(0, name.clone());
                }
                name
            }
            None => match short_names.first() {
                Some(first) => first.clone(),
                None => bail!("emoji record {:?} has no short names", raw.name),
            },
        };

        let image = match raw.image {
            Some(image) => image,
            None => match &raw.unified {
                Some(unified) => image_for_unified(unified),
                None => bail!("emoji record {:?} has neither image nor codepoint", short_name),
            },
        };

        Ok(Emoji {
            unified: raw.unified,
            name: raw.name,
            short_name,
            short_names,
            category: raw.category,
            image,
            sort_order: raw.sort_order,
            sheet_x: raw.sheet_x,
            sheet_y: raw.sheet_y,
            skins: None,
            skin_variations: raw
                .skin_variations
                .into_iter()
                .map(|(key, var)| (key, var.into()))
                .collect(),
        })
    }
}

fn image_for_unified(unified: &str) -> String {
    format!("{}.png", unified.to_lowercase())
}

/// One entry of the bundled category table, in picker display order.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub name: String,
    pub label: String,
}

/// The dataset categories plus the synthetic ones the picker needs
/// (`recent`, `searchResults`, `custom`).
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        CategoryTable { categories }
    }

    /// Category keys in display order: `recent`, then the dataset
    /// categories, then `custom`.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.categories.len() + 2);
        names.push("recent".to_owned());
        names.extend(self.categories.iter().map(|c| normalize_category(&c.name)));
        names.push("custom".to_owned());
        names
    }

    /// Key → label pairs for every category, synthetic ones included.
    /// `searchResults` only exists here; it never appears in [`names`].
    ///
    /// [`names`]: CategoryTable::names
    pub fn labels(&self) -> Vec<(String, String)> {
        let mut labels = Vec::with_capacity(self.categories.len() + 3);
        labels.push(("recent".to_owned(), "Recently Used".to_owned()));
        for category in &self.categories {
            labels.push((normalize_category(&category.name), category.label.clone()));
        }
        labels.push(("searchResults".to_owned(), "Search Results".to_owned()));
        labels.push(("custom".to_owned(), "Custom".to_owned()));
        labels
    }
}

/// Parses the two bundled metadata tables.
pub fn load_dataset(emoji_json: &str, categories_json: &str) -> Result<(Vec<Emoji>, Vec<Category>)> {
    let raw: Vec<RawEmoji> =
        serde_json::from_str(emoji_json).context("parsing emoji metadata table")?;
    let emojis = raw
        .into_iter()
        .map(Emoji::try_from)
        .collect::<Result<Vec<_>>>()?;

    let categories: Vec<Category> =
        serde_json::from_str(categories_json).context("parsing category table")?;

    Ok((emojis, categories))
}

/// Reads a newline-delimited exclusion list. CRLF endings and blank lines
/// are tolerated; a missing file is an error since the path was asked for
/// explicitly.
pub fn load_exclusions(path: &Path) -> Result<AHashSet<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading exclusion list {}", path.display()))?;
    Ok(parse_exclusions(&text))
}

pub fn parse_exclusions(text: &str) -> AHashSet<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Drops every record any of whose short names appears in `excluded`.
/// Dropping the base record here, before expansion, also drops every skin
/// variant it would have produced.
pub fn filter_excluded(emojis: Vec<Emoji>, excluded: &AHashSet<String>) -> Vec<Emoji> {
    if excluded.is_empty() {
        return emojis;
    }
    emojis
        .into_iter()
        .filter(|e| !e.short_names.iter().any(|name| excluded.contains(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_normalization() {
        assert_eq!(normalize_category("Smileys & People"), "smileys-people");
        assert_eq!(normalize_category("Food & Drink"), "food-drink");
        assert_eq!(normalize_category("Flags"), "flags");
        assert_eq!(normalize_category("Skin Tones"), "skin-tones");
    }

    #[test]
    fn skin_tag_lookup_with_unmapped_codepoint() {
        assert_eq!(skin_tag("1F3FB"), "light_skin_tone");
        assert_eq!(skin_tag("1F3FF"), "dark_skin_tone");
        // Unmapped codepoints produce an empty tag, not an error.
        assert_eq!(skin_tag("1F9B0"), "");
    }

    #[test]
    fn exclusion_list_tolerates_crlf_and_blanks() {
        let parsed = parse_exclusions("smile\r\n\nthumbsup\nwave\r\n");
        assert_eq!(parsed.len(), 3);
        assert!(parsed.contains("smile"));
        assert!(parsed.contains("thumbsup"));
        assert!(parsed.contains("wave"));
    }

    #[test]
    fn filter_drops_record_matching_any_alias() {
        let (emojis, _) = load_dataset(
            r#"[
                {"name": "A", "short_names": ["a", "a_alt"], "unified": "1F600", "category": "Smileys & People", "sheet_x": 0, "sheet_y": 0, "sort_order": 1},
                {"name": "B", "short_names": ["b"], "unified": "1F601", "category": "Smileys & People", "sheet_x": 1, "sheet_y": 0, "sort_order": 2}
            ]"#,
            "[]",
        )
        .unwrap();

        let mut excluded = AHashSet::new();
        excluded.insert("a_alt".to_owned());
        let kept = filter_excluded(emojis, &excluded);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].short_name, "b");
    }

    #[test]
    fn missing_image_is_derived_from_codepoint() {
        let (emojis, _) = load_dataset(
            r#"[{"short_names": ["a"], "sort_order": 2, "unified": "1F600", "category": "Smileys & People", "sheet_x": 0, "sheet_y": 0}]"#,
            "[]",
        )
        .unwrap();
        assert_eq!(emojis[0].short_name, "a");
        assert_eq!(emojis[0].image, "1f600.png");
    }

    #[test]
    fn missing_variation_image_is_derived_from_codepoint() {
        let (emojis, _) = load_dataset(
            r#"[{
                "name": "WAVING HAND SIGN",
                "unified": "1F44B",
                "image": "1f44b.png",
                "short_names": ["wave"],
                "category": "People & Body",
                "sort_order": 163,
                "skin_variations": {
                    "1F3FB": {"unified": "1F44B-1F3FB", "sheet_x": 15, "sheet_y": 6}
                }
            }]"#,
            "[]",
        )
        .unwrap();
        let variation = emojis[0].skin_variations.get("1F3FB").unwrap();
        assert_eq!(variation.image, "1f44b-1f3fb.png");
    }

    #[test]
    fn record_without_short_names_is_rejected() {
        let result = load_dataset(
            r#"[{"name": "Nameless", "unified": "1F600", "category": "Symbols"}]"#,
            "[]",
        );
        assert!(result.is_err());
    }

    #[test]
    fn vendor_fields_are_ignored() {
        let (emojis, _) = load_dataset(
            r#"[{
                "name": "GRINNING FACE",
                "unified": "1F600",
                "non_qualified": null,
                "docomo": null,
                "au": "EB80",
                "softbank": null,
                "google": "FE340",
                "image": "1f600.png",
                "sheet_x": 32,
                "sheet_y": 20,
                "short_name": "grinning",
                "short_names": ["grinning"],
                "category": "Smileys & Emotion",
                "subcategory": "face-smiling",
                "sort_order": 1,
                "added_in": "1.0",
                "has_img_apple": true,
                "has_img_google": true,
                "has_img_twitter": true,
                "has_img_facebook": false
            }]"#,
            "[]",
        )
        .unwrap();
        assert_eq!(emojis[0].short_name, "grinning");
        assert_eq!(emojis[0].sheet_x, Some(32));
    }

    #[test]
    fn category_table_ordering_and_labels() {
        let table = CategoryTable::new(vec![
            Category {
                name: "Smileys & People".to_owned(),
                label: "Smileys & People".to_owned(),
            },
            Category {
                name: "Flags".to_owned(),
                label: "Flags".to_owned(),
            },
        ]);

        assert_eq!(table.names(), vec!["recent", "smileys-people", "flags", "custom"]);

        let labels = table.labels();
        assert_eq!(labels.first().unwrap().0, "recent");
        assert_eq!(labels.last().unwrap(), &("custom".to_owned(), "Custom".to_owned()));
        assert!(labels.iter().any(|(k, _)| k == "searchResults"));
        // searchResults is a label-only category.
        assert!(!table.names().iter().any(|n| n == "searchResults"));
    }
}
