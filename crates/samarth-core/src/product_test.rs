use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// slugify
// -----------------------------------------------------------------------

#[test]
fn slugify_joins_words_with_hyphens() {
    assert_eq!(slugify("Lal Khadi Red Chilli"), "lal-khadi-red-chilli");
}

#[test]
fn slugify_collapses_symbol_runs_and_trims() {
    assert_eq!(slugify("  A/B--C  "), "a-b-c");
}

#[test]
fn slugify_strips_leading_and_trailing_symbols() {
    assert_eq!(slugify("--1121 Basmati (Sella)!"), "1121-basmati-sella");
}

#[test]
fn slugify_of_symbols_only_is_empty() {
    assert_eq!(slugify(" / - "), "");
}

// -----------------------------------------------------------------------
// validation
// -----------------------------------------------------------------------

#[test]
fn valid_list_requires_array() {
    assert!(!is_valid_product_list(&json!({"name": "Garlic"})));
    assert!(!is_valid_product_list(&json!("Garlic")));
}

#[test]
fn valid_list_accepts_empty_array() {
    assert!(is_valid_product_list(&json!([])));
}

#[test]
fn valid_list_rejects_element_without_name() {
    let value = json!([{"name": "Garlic"}, {"id": "onion"}]);
    assert!(!is_valid_product_list(&value));
}

#[test]
fn valid_list_rejects_empty_name_and_null_element() {
    assert!(!is_valid_product_list(&json!([{"name": ""}])));
    assert!(!is_valid_product_list(&json!([null])));
}

#[test]
fn valid_list_accepts_every_named_element() {
    let value = json!([{"name": "Garlic"}, {"name": "Onion", "extra": 1}]);
    assert!(is_valid_product_list(&value));
}

// -----------------------------------------------------------------------
// parse_product_list
// -----------------------------------------------------------------------

#[test]
fn parse_rejects_malformed_json() {
    let err = parse_product_list("[{").unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn parse_rejects_invalid_shape() {
    let err = parse_product_list(r#"[{"name": ""}]"#).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidShape));
}

#[test]
fn parse_derives_missing_id_from_name() {
    let products = parse_product_list(r#"[{"name": "Dehydrated Garlic Flakes"}]"#).unwrap();
    assert_eq!(products[0].id, "dehydrated-garlic-flakes");
}

#[test]
fn parse_keeps_explicit_id() {
    let products = parse_product_list(r#"[{"id": "g-1", "name": "Garlic"}]"#).unwrap();
    assert_eq!(products[0].id, "g-1");
}

#[test]
fn parse_splits_comma_separated_tags() {
    let products = parse_product_list(r#"[{"name": "Garlic", "tags": "a, b ,,c"}]"#).unwrap();
    assert_eq!(
        products[0].tags.as_deref(),
        Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
    );
}

#[test]
fn parse_trims_array_tags_and_drops_blanks() {
    let products =
        parse_product_list(r#"[{"name": "Garlic", "tags": [" dried ", "", "export"]}]"#).unwrap();
    assert_eq!(products[0].tag_list(), ["dried", "export"]);
}

#[test]
fn parse_distinguishes_absent_tags() {
    let products = parse_product_list(r#"[{"name": "Garlic"}]"#).unwrap();
    assert!(products[0].tags.is_none());
    assert!(products[0].tag_list().is_empty());
}

#[test]
fn parse_preserves_empty_optional_strings() {
    let products = parse_product_list(r#"[{"name": "Garlic", "category": ""}]"#).unwrap();
    assert_eq!(products[0].category.as_deref(), Some(""));
}

#[test]
fn parse_tolerates_loosely_typed_optional_fields() {
    let products = parse_product_list(
        r#"[
            {"name": "Makhana", "moq": 500, "origin": null, "packaging": {"kg": 10}},
            {"id": null, "name": "Fox Nuts", "summary": true},
            {"id": 42, "name": "Onion", "tags": ["fresh", 7, null, {"x": 1}]},
            {"name": "Chilli", "tags": 3}
        ]"#,
    )
    .unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[0].moq.as_deref(), Some("500"));
    assert!(products[0].origin.is_none());
    assert!(products[0].packaging.is_none());
    assert_eq!(products[1].id, "fox-nuts");
    assert_eq!(products[1].summary.as_deref(), Some("true"));
    assert_eq!(products[2].id, "42");
    assert_eq!(products[2].tag_list(), ["fresh", "7"]);
    assert_eq!(products[3].tag_list(), ["3"]);
}

#[test]
fn every_list_passing_validation_parses() {
    for text in [r#"[{"name":"Makhana","moq":500}]"#, r#"[{"id":null,"name":"Makhana"}]"#] {
        let value: Value = serde_json::from_str(text).unwrap();
        assert!(is_valid_product_list(&value), "{text}");
        assert_eq!(parse_product_list(text).unwrap().len(), 1, "{text}");
    }
}

// -----------------------------------------------------------------------
// accessors
// -----------------------------------------------------------------------

fn garlic() -> Product {
    Product {
        id: "garlic".into(),
        name: "Dehydrated Garlic".into(),
        category: Some("Spices".into()),
        subcategory: Some("Garlic".into()),
        summary: Some("Flakes and powder".into()),
        tags: Some(vec!["Dried".into(), "Bulk".into()]),
        ..Product::default()
    }
}

#[test]
fn image_falls_back_to_placeholder_when_blank() {
    let mut product = garlic();
    assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE);
    product.image = Some("   ".into());
    assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE);
    product.image = Some("/images/garlic.webp".into());
    assert_eq!(product.image_or_placeholder(), "/images/garlic.webp");
}

#[test]
fn eyebrow_prefers_subcategory_then_category() {
    let mut product = garlic();
    assert_eq!(product.eyebrow(), "Garlic");
    product.subcategory = Some(String::new());
    assert_eq!(product.eyebrow(), "Spices");
    product.category = None;
    assert_eq!(product.eyebrow(), FALLBACK_EYEBROW);
}

#[test]
fn searchable_text_is_lowercased_concatenation() {
    assert_eq!(
        garlic().searchable_text(),
        "dehydrated garlic flakes and powder spices garlic dried bulk"
    );
}

#[test]
fn pretty_json_omits_absent_fields() {
    let text = to_pretty_json(&[Product {
        id: "onion".into(),
        name: "Onion".into(),
        ..Product::default()
    }])
    .unwrap();
    assert!(text.contains("\n"), "expected pretty-printed output");
    assert!(!text.contains("category"));
    let reparsed = parse_product_list(&text).unwrap();
    assert_eq!(reparsed[0].id, "onion");
}
