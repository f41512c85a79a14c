//! The catalog's single domain record and the normalization applied to it at
//! the data-access boundary.
//!
//! Product JSON comes from three places: the static defaults file, the
//! persisted working list, and admin imports. All three go through
//! [`parse_product_list`], so every downstream consumer sees the same shape:
//! an `id` is always present and `tags` is always a list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::CatalogError;

/// Image path shown when a product has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

/// Eyebrow label for products with neither subcategory nor category.
pub const FALLBACK_EYEBROW: &str = "Export item";

/// One catalog entry.
///
/// Optional descriptive fields keep the distinction between "absent" (`None`)
/// and "present but empty" (`Some("")`): reconciliation backfills the former
/// from the defaults and keeps the latter as an explicit edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub subcategory: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub packaging: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub moq: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Ordered labels. Accepts a JSON array or a comma-separated string.
    #[serde(
        default,
        deserialize_with = "deserialize_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
}

impl Product {
    /// The product image, or [`PLACEHOLDER_IMAGE`] when absent or blank.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        populated(self.image.as_ref()).unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Tags as a slice; empty when the record carries none.
    #[must_use]
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Short label shown above the product name on cards and detail pages.
    #[must_use]
    pub fn eyebrow(&self) -> &str {
        populated(self.subcategory.as_ref())
            .or_else(|| populated(self.category.as_ref()))
            .unwrap_or(FALLBACK_EYEBROW)
    }

    /// Lowercased text the catalog search matches against: name, summary,
    /// category, subcategory, and the tags joined by spaces.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let tags = self.tag_list().join(" ");
        [
            Some(self.name.as_str()),
            populated(self.summary.as_ref()),
            populated(self.category.as_ref()),
            populated(self.subcategory.as_ref()),
            Some(tags.as_str()).filter(|t| !t.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// Returns the trimmed value when the field is present and not blank.
#[must_use]
pub fn populated(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Derive a URL-safe identifier from a display name.
///
/// Lowercases, trims, collapses every run of characters outside `[a-z0-9]`
/// into one `-`, and strips leading/trailing hyphens.
#[must_use]
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

fn normalize_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tags.into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Scalars become text; `null`, arrays, and objects count as absent.
fn lenient_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(lenient_text))
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.unwrap_or_default())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => {
            let items: Vec<String> = items.into_iter().filter_map(lenient_text).collect();
            Some(normalize_tags(items.iter().map(String::as_str)))
        }
        Some(other) => lenient_text(other).map(|joined| split_tags(&joined)),
        None => None,
    })
}

/// A candidate is a valid product list iff it is an array and every element
/// is an object with a non-empty string `name`.
#[must_use]
pub fn is_valid_product_list(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items.iter().all(|item| {
            item.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| !name.is_empty())
        })
    })
}

/// Parse, validate, and normalize a product list from JSON text.
///
/// # Errors
///
/// - [`CatalogError::Json`] if the text is not JSON or a record does not fit
///   the product shape.
/// - [`CatalogError::InvalidShape`] if the JSON fails
///   [`is_valid_product_list`].
pub fn parse_product_list(text: &str) -> Result<Vec<Product>, CatalogError> {
    let value: Value = serde_json::from_str(text)?;
    products_from_value(value)
}

/// Validate and normalize an already-decoded JSON value.
///
/// # Errors
///
/// See [`parse_product_list`].
pub fn products_from_value(value: Value) -> Result<Vec<Product>, CatalogError> {
    if !is_valid_product_list(&value) {
        return Err(CatalogError::InvalidShape);
    }
    let mut products: Vec<Product> = serde_json::from_value(value)?;
    for product in &mut products {
        normalize_product(product);
    }
    Ok(products)
}

/// Fill in a missing identifier from the name.
fn normalize_product(product: &mut Product) {
    if product.id.trim().is_empty() {
        product.id = slugify(&product.name);
    }
}

/// Serialize the full list the way it is persisted and exported.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] if serialization fails.
pub fn to_pretty_json(products: &[Product]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(products)?)
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
