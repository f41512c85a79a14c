//! Reconciles the persisted working list with the canonical defaults.

use std::collections::{HashMap, HashSet};

use crate::product::{Product, PLACEHOLDER_IMAGE};

/// Image formats that newer defaults replace.
const LEGACY_IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Merge persisted edits with the defaults, by `id`.
///
/// Persisted items come first in their stored order. Each one that matches a
/// default is overlaid on that default: present persisted fields win, absent
/// ones are backfilled. The image is the exception and follows
/// [`should_take_default_image`]. Defaults no persisted item claims are
/// appended in default order.
#[must_use]
pub fn merge(persisted: Option<&[Product]>, defaults: &[Product]) -> Vec<Product> {
    let persisted = match persisted {
        Some(items) if !items.is_empty() => items,
        _ => return defaults.to_vec(),
    };

    let by_id: HashMap<&str, &Product> = defaults.iter().map(|d| (d.id.as_str(), d)).collect();
    let persisted_ids: HashSet<&str> = persisted.iter().map(|p| p.id.as_str()).collect();

    let mut merged: Vec<Product> = persisted
        .iter()
        .map(|item| match by_id.get(item.id.as_str()) {
            Some(default) => overlay(default, item),
            None => item.clone(),
        })
        .collect();

    merged.extend(
        defaults
            .iter()
            .filter(|d| !persisted_ids.contains(d.id.as_str()))
            .cloned(),
    );

    merged
}

fn overlay(default: &Product, persisted: &Product) -> Product {
    let pick = |ours: &Option<String>, theirs: &Option<String>| ours.clone().or_else(|| theirs.clone());

    let image = if should_take_default_image(persisted.image.as_deref(), default.image.as_deref()) {
        default.image.clone()
    } else {
        persisted.image.clone()
    };

    Product {
        id: persisted.id.clone(),
        name: persisted.name.clone(),
        category: pick(&persisted.category, &default.category),
        subcategory: pick(&persisted.subcategory, &default.subcategory),
        origin: pick(&persisted.origin, &default.origin),
        packaging: pick(&persisted.packaging, &default.packaging),
        moq: pick(&persisted.moq, &default.moq),
        summary: pick(&persisted.summary, &default.summary),
        description: pick(&persisted.description, &default.description),
        image,
        tags: persisted.tags.clone().or_else(|| default.tags.clone()),
    }
}

/// Whether the default image replaces the persisted one.
///
/// True when the persisted image is absent, blank, the placeholder, or a
/// legacy-format path while the default points at a different, non-legacy
/// image.
#[must_use]
pub fn should_take_default_image(persisted: Option<&str>, default: Option<&str>) -> bool {
    let Some(current) = persisted.map(str::trim).filter(|s| !s.is_empty()) else {
        return true;
    };
    if current == PLACEHOLDER_IMAGE {
        return true;
    }

    let Some(replacement) = default.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };

    is_legacy_image(current) && !is_legacy_image(replacement) && replacement != current
}

fn is_legacy_image(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    LEGACY_IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, image: Option<&str>) -> Product {
        Product {
            id: id.to_owned(),
            name: format!("Product {id}"),
            image: image.map(ToOwned::to_owned),
            ..Product::default()
        }
    }

    fn defaults() -> Vec<Product> {
        vec![
            Product {
                category: Some("Rice".into()),
                summary: Some("Long grain".into()),
                ..product("basmati", Some("/images/basmati.webp"))
            },
            product("garlic", Some("/images/garlic.webp")),
            product("onion", Some("/images/onion.webp")),
        ]
    }

    #[test]
    fn merge_without_persisted_returns_defaults() {
        assert_eq!(merge(None, &defaults()), defaults());
    }

    #[test]
    fn merge_with_empty_persisted_returns_defaults() {
        assert_eq!(merge(Some(&[][..]), &defaults()), defaults());
    }

    #[test]
    fn persisted_fields_win_and_absent_fields_are_backfilled() {
        let mut edited = product("basmati", Some("/images/custom.webp"));
        edited.name = "Premium Basmati".into();
        edited.summary = Some("Aged two years".into());

        let merged = merge(Some(&[edited][..]), &defaults());
        let basmati = &merged[0];
        assert_eq!(basmati.name, "Premium Basmati");
        assert_eq!(basmati.summary.as_deref(), Some("Aged two years"));
        assert_eq!(basmati.category.as_deref(), Some("Rice"));
        assert_eq!(basmati.image.as_deref(), Some("/images/custom.webp"));
    }

    #[test]
    fn present_but_empty_field_overrides_default() {
        let mut edited = product("basmati", None);
        edited.category = Some(String::new());
        let merged = merge(Some(&[edited][..]), &defaults());
        assert_eq!(merged[0].category.as_deref(), Some(""));
    }

    #[test]
    fn empty_or_placeholder_image_takes_default() {
        for image in [None, Some(""), Some(PLACEHOLDER_IMAGE)] {
            let merged = merge(Some(&[product("garlic", image)][..]), &defaults());
            let garlic = merged.iter().find(|p| p.id == "garlic").unwrap();
            assert_eq!(garlic.image.as_deref(), Some("/images/garlic.webp"), "{image:?}");
        }
    }

    #[test]
    fn legacy_image_is_superseded_by_newer_default() {
        let merged = merge(
            Some(&[product("garlic", Some("/images/garlic.png"))][..]),
            &defaults(),
        );
        assert_eq!(merged[0].image.as_deref(), Some("/images/garlic.webp"));
    }

    #[test]
    fn legacy_image_kept_when_default_is_also_legacy() {
        let defaults = vec![product("garlic", Some("/images/garlic-default.jpg"))];
        let merged = merge(
            Some(&[product("garlic", Some("/images/garlic.png"))][..]),
            &defaults,
        );
        assert_eq!(merged[0].image.as_deref(), Some("/images/garlic.png"));
    }

    #[test]
    fn persisted_only_items_are_kept_in_order() {
        let persisted = vec![product("makhana", None), product("garlic", None)];
        let merged = merge(Some(persisted.as_slice()), &defaults());
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["makhana", "garlic", "basmati", "onion"]);
        assert!(merged[0].image.is_none());
    }

    #[test]
    fn missing_defaults_appear_exactly_once_at_end() {
        let merged = merge(Some(&[product("onion", None)][..]), &defaults());
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["onion", "basmati", "garlic"]);
    }

    #[test]
    fn should_take_default_image_keeps_custom_modern_image() {
        assert!(!should_take_default_image(
            Some("/images/custom.webp"),
            Some("/images/garlic.webp")
        ));
    }

    #[test]
    fn should_take_default_image_keeps_legacy_without_default() {
        assert!(!should_take_default_image(Some("/images/garlic.png"), None));
    }
}
