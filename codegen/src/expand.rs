//! Record-list transformations that run between loading and indexing:
//! skin-tone expansion, legacy alias augmentation and the injected
//! custom entry.

use crate::data::{self, Emoji};
use std::collections::BTreeMap;

/// Synthesizes one record per skin variation of every base record.
///
/// The derived short name is the base short name plus the
/// underscore-joined tags of the variation key; every base alias gets the
/// same suffix, and the display name gets `: ` plus the joined tone
/// labels. Codepoints, image and sheet coordinates come from the
/// variation itself, everything else is copied from the base.
pub fn expand_skin_variations(emojis: Vec<Emoji>) -> Vec<Emoji> {
    let mut out = Vec::with_capacity(emojis.len() * 2);

    for base in emojis {
        let variations: Vec<(String, data::SkinVariation)> =
            base.skin_variations.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        out.push(base.clone());

        for (key, variation) in variations {
            let tags: Vec<&str> = key.split('-').map(data::skin_tag).collect();
            let suffix = tags.join("_");
            let labels = tags
                .iter()
                .map(|tag| data::skin_label(tag))
                .collect::<Vec<_>>()
                .join(", ");

            out.push(Emoji {
                unified: Some(variation.unified),
                name: format!("{}: {}", base.name, labels),
                short_name: format!("{}_{}", base.short_name, suffix),
                short_names: base
                    .short_names
                    .iter()
                    .map(|alias| format!("{}_{}", alias, suffix))
                    .collect(),
                category: base.category.clone(),
                image: variation.image,
                sort_order: base.sort_order,
                sheet_x: Some(variation.sheet_x),
                sheet_y: Some(variation.sheet_y),
                skins: Some(tags.iter().map(|tag| (*tag).to_owned()).collect()),
                skin_variations: BTreeMap::new(),
            });
        }
    }

    out
}

/// Appends the legacy aliases from [`data::LEGACY_ALIASES`] to every
/// record whose short name matches a table key. Running after skin
/// expansion means suffixed variant names that happen to match a key are
/// augmented too.
pub fn augment_aliases(emojis: &mut [Emoji]) {
    for emoji in emojis.iter_mut() {
        if let Some((_, extra)) = data::LEGACY_ALIASES
            .iter()
            .find(|(name, _)| *name == emoji.short_name)
        {
            emoji
                .short_names
                .extend(extra.iter().map(|alias| (*alias).to_owned()));
        }
    }
}

/// The one built-in emoji that does not come from the dataset. No
/// codepoint, no sheet coordinates, no sort key.
pub fn custom_entry() -> Emoji {
    Emoji {
        unified: None,
        name: "Logo".to_owned(),
        short_name: "logo".to_owned(),
        short_names: vec!["logo".to_owned()],
        category: "custom".to_owned(),
        image: "logo.png".to_owned(),
        sort_order: None,
        sheet_x: None,
        sheet_y: None,
        skins: None,
        skin_variations: BTreeMap::new(),
    }
}
