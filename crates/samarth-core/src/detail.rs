//! Single-product lookup and the detail page view model.

use serde::Serialize;

use crate::catalog::ProductCard;
use crate::product::{populated, Product};

/// Maximum number of "other products" shown under a detail page.
pub const RELATED_LIMIT: usize = 3;

/// Where the not-found page sends the visitor.
pub const CATALOG_PATH: &str = "/#products";

/// Exact-match lookup by id.
#[must_use]
pub fn resolve<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

/// Up to [`RELATED_LIMIT`] other products, in list order.
#[must_use]
pub fn related<'a>(products: &'a [Product], id: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.id != id)
        .take(RELATED_LIMIT)
        .collect()
}

/// One labelled fact on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Everything the detail page shows for a found product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub eyebrow: String,
    pub image: String,
    /// Description, falling back to the summary.
    pub body: Option<String>,
    /// Populated metadata only, in display order.
    pub fields: Vec<DetailField>,
    pub related: Vec<ProductCard>,
}

/// The detail page in one of its three states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView {
    Loading,
    NotFound { message: String, back_link: String },
    Found(Box<ProductDetail>),
}

impl DetailView {
    #[must_use]
    pub fn build(products: &[Product], id: &str, loading: bool) -> Self {
        if loading {
            return DetailView::Loading;
        }

        let Some(product) = resolve(products, id) else {
            return DetailView::NotFound {
                message: "We could not find that product.".to_owned(),
                back_link: CATALOG_PATH.to_owned(),
            };
        };

        let tags = product.tag_list().join(", ");
        let fields = [
            ("Category", populated(product.category.as_ref())),
            ("Subcategory", populated(product.subcategory.as_ref())),
            ("Origin", populated(product.origin.as_ref())),
            ("Packaging", populated(product.packaging.as_ref())),
            ("MOQ", populated(product.moq.as_ref())),
            ("Tags", Some(tags.as_str()).filter(|t| !t.is_empty())),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value.map(|v| DetailField {
                label,
                value: v.to_owned(),
            })
        })
        .collect();

        DetailView::Found(Box::new(ProductDetail {
            id: product.id.clone(),
            name: product.name.clone(),
            eyebrow: product.eyebrow().to_owned(),
            image: product.image_or_placeholder().to_owned(),
            body: populated(product.description.as_ref())
                .or_else(|| populated(product.summary.as_ref()))
                .map(ToOwned::to_owned),
            fields,
            related: related(products, id)
                .into_iter()
                .map(ProductCard::from)
                .collect(),
        }))
    }
}
