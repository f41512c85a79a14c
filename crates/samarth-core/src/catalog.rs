//! Catalog browsing: category/subcategory/free-text filtering and the view
//! models the catalog and gallery pages render.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::{populated, Product};
use crate::uri::encode_component;
use crate::CatalogError;

/// Tab label that matches every subcategory of the selected category.
pub const ALL_SUBCATEGORIES: &str = "All";

/// Number of tiles on the gallery page.
pub const GALLERY_SIZE: usize = 12;

/// The fixed product categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Rice,
    Confectionery,
    Spices,
    Agricultural,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Rice,
        Category::Confectionery,
        Category::Spices,
        Category::Agricultural,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rice => "Rice",
            Category::Confectionery => "Confectionery",
            Category::Spices => "Spices",
            Category::Agricultural => "Agricultural",
        }
    }

    /// Preferred subcategory tab order for this category.
    #[must_use]
    pub fn subcategory_order(self) -> &'static [&'static str] {
        match self {
            Category::Rice => &["Basmati", "Non-Basmati", "Sella"],
            Category::Confectionery => &["Candy", "Lollipop", "Jelly"],
            Category::Spices => &[
                "Chilli",
                "Coriander",
                "Garlic",
                "Oregano",
                "Seasoning Herbs",
                "Whole Spices",
            ],
            Category::Agricultural => &["Onion", "Makhana", "Other"],
        }
    }

    /// Two-letter badge shown on category cards.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Category::Rice => "RC",
            Category::Confectionery => "CF",
            Category::Spices => "SP",
            Category::Agricultural => "AG",
        }
    }

    /// Banner image for the category card.
    #[must_use]
    pub fn image(self) -> &'static str {
        match self {
            Category::Rice => "/images/basmati-rice.webp",
            Category::Confectionery => "/images/confectionery.webp",
            Category::Spices => "/images/spices.webp",
            Category::Agricultural => "/images/agricultural-products.webp",
        }
    }

    fn matches(self, product: &Product) -> bool {
        product.category.as_deref() == Some(self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_owned()))
    }
}

/// The three composable catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Category,
    /// `None` selects every subcategory.
    pub subcategory: Option<String>,
    pub text: String,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Select a subcategory; blank or `"All"` clears the selection.
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: Option<&str>) -> Self {
        self.subcategory = subcategory
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ALL_SUBCATEGORIES)
            .map(ToOwned::to_owned);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: Option<&str>) -> Self {
        self.text = text.unwrap_or_default().to_owned();
        self
    }

    /// Whether a product passes all three filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.text.trim().to_lowercase();
        self.category.matches(product)
            && self
                .subcategory
                .as_deref()
                .is_none_or(|sub| product.subcategory.as_deref() == Some(sub))
            && (needle.is_empty() || product.searchable_text().contains(&needle))
    }
}

/// Products passing every filter, in list order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    products.iter().filter(|p| query.matches(p)).collect()
}

/// Subcategories observed in `category`: preferred order first, then any
/// unlisted ones in first-seen order.
#[must_use]
pub fn subcategories_for(products: &[Product], category: Category) -> Vec<String> {
    let mut observed: Vec<&str> = Vec::new();
    for product in products.iter().filter(|p| category.matches(p)) {
        if let Some(sub) = product.subcategory.as_deref().filter(|s| !s.is_empty()) {
            if !observed.contains(&sub) {
                observed.push(sub);
            }
        }
    }

    let preferred = category.subcategory_order();
    let mut ordered: Vec<String> = preferred
        .iter()
        .filter(|p| observed.contains(*p))
        .map(|p| (*p).to_owned())
        .collect();
    ordered.extend(
        observed
            .into_iter()
            .filter(|o| !preferred.contains(o))
            .map(ToOwned::to_owned),
    );
    ordered
}

/// Whether the page is still loading, found nothing, or has results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Empty,
    Results,
}

impl ViewState {
    fn from_count(loading: bool, count: usize) -> Self {
        match (loading, count) {
            (true, _) => ViewState::Loading,
            (false, 0) => ViewState::Empty,
            _ => ViewState::Results,
        }
    }

    /// User-facing status line; `None` when results are shown.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            ViewState::Loading => Some("Loading products..."),
            ViewState::Empty => Some("No matching products found."),
            ViewState::Results => None,
        }
    }
}

/// Everything a product card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub eyebrow: String,
    pub summary: Option<String>,
    pub image: String,
    pub detail_path: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            eyebrow: product.eyebrow().to_owned(),
            summary: populated(product.summary.as_ref()).map(ToOwned::to_owned),
            image: product.image_or_placeholder().to_owned(),
            detail_path: detail_path(&product.id),
        }
    }
}

/// Site path of a product's detail page.
#[must_use]
pub fn detail_path(id: &str) -> String {
    format!("/product/{}", encode_component(id))
}

/// A category card: name, badge, banner, item count, and whether it is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub icon: &'static str,
    pub image: &'static str,
    pub count: usize,
    pub selected: bool,
}

/// Item counts for every known category, in display order.
#[must_use]
pub fn category_summaries(products: &[Product], selected: Category) -> Vec<CategorySummary> {
    Category::ALL
        .into_iter()
        .map(|category| CategorySummary {
            category,
            icon: category.icon(),
            image: category.image(),
            count: products.iter().filter(|p| category.matches(p)).count(),
            selected: category == selected,
        })
        .collect()
}

/// The rendered catalog page.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub category: Category,
    pub categories: Vec<CategorySummary>,
    pub subcategory_tabs: Vec<String>,
    pub selected_subcategory: String,
    pub query: String,
    pub state: ViewState,
    pub message: Option<&'static str>,
    pub count_label: String,
    pub items: Vec<ProductCard>,
}

impl CatalogView {
    /// Build the catalog page for the working list.
    ///
    /// While `loading` is set the page carries no items and reports
    /// [`ViewState::Loading`], never "no results".
    #[must_use]
    pub fn build(products: &[Product], loading: bool, query: &CatalogQuery) -> Self {
        let items: Vec<ProductCard> = if loading {
            Vec::new()
        } else {
            filter_products(products, query)
                .into_iter()
                .map(ProductCard::from)
                .collect()
        };

        let mut subcategory_tabs = vec![ALL_SUBCATEGORIES.to_owned()];
        subcategory_tabs.extend(subcategories_for(products, query.category));

        let state = ViewState::from_count(loading, items.len());

        Self {
            category: query.category,
            categories: category_summaries(products, query.category),
            subcategory_tabs,
            selected_subcategory: query
                .subcategory
                .clone()
                .unwrap_or_else(|| ALL_SUBCATEGORIES.to_owned()),
            query: query.text.clone(),
            state,
            message: state.message(),
            count_label: count_label(items.len()),
            items,
        }
    }
}

fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Showing {count} product{plural}")
}

/// One gallery tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryTile {
    pub id: String,
    pub caption: String,
    pub image: String,
}

/// The gallery page: the first [`GALLERY_SIZE`] products.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub state: ViewState,
    pub message: Option<&'static str>,
    pub tiles: Vec<GalleryTile>,
}

impl GalleryView {
    #[must_use]
    pub fn build(products: &[Product], loading: bool) -> Self {
        let tiles: Vec<GalleryTile> = if loading {
            Vec::new()
        } else {
            products
                .iter()
                .take(GALLERY_SIZE)
                .map(|p| GalleryTile {
                    id: p.id.clone(),
                    caption: p.name.clone(),
                    image: p.image_or_placeholder().to_owned(),
                })
                .collect()
        };
        let state = ViewState::from_count(loading, tiles.len());
        let message = match state {
            ViewState::Loading => Some("Loading gallery..."),
            ViewState::Empty => Some("Gallery items will appear once products are loaded."),
            ViewState::Results => None,
        };
        Self {
            state,
            message,
            tiles,
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
