//! The catalog admin editor: CRUD over the working list with an edit slot,
//! JSON import/export, and reset to the defaults.
//!
//! The editor owns the working list. Every successful mutation is written
//! through the injected [`CatalogPersistence`] before the call returns. A
//! write failure does not undo the in-memory change; it is logged and
//! reported in the returned [`Outcome`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::{parse_product_list, slugify, split_tags, to_pretty_json, Product, PLACEHOLDER_IMAGE};
use crate::CatalogError;

/// File name offered for downloads of the working list.
pub const EXPORT_FILENAME: &str = "products.json";

/// Shown in admin rows for blank category/subcategory.
const NOT_SET: &str = "Not set";

/// Where the editor writes the full working list after each mutation.
pub trait CatalogPersistence {
    type Error: std::fmt::Display;

    /// Overwrite the stored list with `products`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the write fails.
    fn persist(&self, products: &[Product]) -> Result<(), Self::Error>;
}

impl<T: CatalogPersistence + ?Sized> CatalogPersistence for Arc<T> {
    type Error = T::Error;

    fn persist(&self, products: &[Product]) -> Result<(), Self::Error> {
        (**self).persist(products)
    }
}

/// A destination for "copy JSON".
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns an I/O error when no clipboard is available or the write fails.
    fn write_text(&self, text: &str) -> std::io::Result<()>;
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Please enter a product name.")]
    MissingName,

    #[error("Product ID already exists. Please use a unique ID.")]
    DuplicateId { id: String },

    #[error("no product at index {index}")]
    IndexOutOfRange { index: usize },

    #[error("{action} requires explicit confirmation")]
    ConfirmationRequired { action: &'static str },

    #[error("Invalid JSON file. Please check the format.")]
    InvalidImport(#[source] CatalogError),

    #[error("Unable to copy. Please use the download button instead.")]
    ClipboardUnavailable(#[source] std::io::Error),

    #[error("could not serialize the product list: {0}")]
    Serialize(#[source] CatalogError),
}

/// Raw admin form input. Every field is free text; tags are comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub origin: String,
    pub packaging: String,
    pub moq: String,
    pub summary: String,
    pub description: String,
    pub image: String,
    pub tags: String,
}

impl ProductForm {
    /// Pre-fill the form from an existing product; tags are joined with `", "`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: text(&product.category),
            subcategory: text(&product.subcategory),
            origin: text(&product.origin),
            packaging: text(&product.packaging),
            moq: text(&product.moq),
            summary: text(&product.summary),
            description: text(&product.description),
            image: text(&product.image),
            tags: product.tag_list().join(", "),
        }
    }

    /// Trim every field, derive a missing id from the name, split tags, and
    /// default a blank image to the placeholder.
    #[must_use]
    pub fn normalize(&self) -> Product {
        let name = self.name.trim().to_owned();
        let id = match self.id.trim() {
            "" => slugify(&name),
            explicit => explicit.to_owned(),
        };
        let trimmed = |v: &str| Some(v.trim().to_owned());
        let image = match self.image.trim() {
            "" => PLACEHOLDER_IMAGE.to_owned(),
            path => path.to_owned(),
        };

        Product {
            id,
            name,
            category: trimmed(&self.category),
            subcategory: trimmed(&self.subcategory),
            origin: trimmed(&self.origin),
            packaging: trimmed(&self.packaging),
            moq: trimmed(&self.moq),
            summary: trimmed(&self.summary),
            description: trimmed(&self.description),
            image: Some(image),
            tags: Some(split_tags(&self.tags)),
        }
    }
}

/// Result of writing the list after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Persistence {
    Saved,
    Failed(String),
}

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub message: String,
    pub persistence: Persistence,
}

/// A downloadable copy of the working list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: &'static str,
    pub contents: String,
}

/// One line of the admin product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRow {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub summary: String,
}

/// CRUD state machine over the working list.
pub struct AdminEditor<P> {
    products: Vec<Product>,
    edit_slot: Option<usize>,
    persistence: P,
}

impl<P: CatalogPersistence> AdminEditor<P> {
    /// Start in create mode over `products`.
    #[must_use]
    pub fn new(products: Vec<Product>, persistence: P) -> Self {
        Self {
            products,
            edit_slot: None,
            persistence,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Index of the product being edited; `None` in create mode.
    #[must_use]
    pub fn edit_slot(&self) -> Option<usize> {
        self.edit_slot
    }

    #[must_use]
    pub fn persistence_backend(&self) -> &P {
        &self.persistence
    }

    /// Replace the list without persisting, e.g. after the initial load.
    pub fn load(&mut self, products: Vec<Product>) {
        self.products = products;
        self.edit_slot = None;
    }

    #[must_use]
    pub fn rows(&self) -> Vec<AdminRow> {
        let or_not_set = |v: &Option<String>| {
            crate::product::populated(v.as_ref()).map_or_else(|| NOT_SET.to_owned(), ToOwned::to_owned)
        };
        self.products
            .iter()
            .enumerate()
            .map(|(index, p)| AdminRow {
                index,
                id: p.id.clone(),
                name: p.name.clone(),
                category: or_not_set(&p.category),
                subcategory: or_not_set(&p.subcategory),
                summary: p.summary.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Save the form: replace the edited item, or append in create mode.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MissingName`] if the trimmed name is empty.
    /// - [`AdminError::DuplicateId`] if another item already uses the id.
    ///
    /// Neither error changes any state.
    pub fn submit(&mut self, form: &ProductForm) -> Result<Outcome, AdminError> {
        if form.name.trim().is_empty() {
            return Err(AdminError::MissingName);
        }

        let product = form.normalize();
        let clash = self
            .products
            .iter()
            .enumerate()
            .any(|(index, item)| item.id == product.id && Some(index) != self.edit_slot);
        if clash {
            return Err(AdminError::DuplicateId { id: product.id });
        }

        let message = match self.edit_slot.filter(|&i| i < self.products.len()) {
            Some(index) => {
                let message = format!("Updated product '{}'", product.id);
                self.products[index] = product;
                message
            }
            None => {
                let message = format!("Saved product '{}'", product.id);
                self.products.push(product);
                message
            }
        };
        self.edit_slot = None;

        Ok(self.persist(message))
    }

    /// Enter edit mode for `index` and return the pre-filled form.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::IndexOutOfRange`] if there is no such item.
    pub fn begin_edit(&mut self, index: usize) -> Result<ProductForm, AdminError> {
        let product = self
            .products
            .get(index)
            .ok_or(AdminError::IndexOutOfRange { index })?;
        let form = ProductForm::from_product(product);
        self.edit_slot = Some(index);
        Ok(form)
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.edit_slot = None;
    }

    /// Remove the item at `index`. There is no undo.
    ///
    /// # Errors
    ///
    /// - [`AdminError::ConfirmationRequired`] unless `confirmed`.
    /// - [`AdminError::IndexOutOfRange`] if there is no such item.
    pub fn delete(&mut self, index: usize, confirmed: bool) -> Result<Outcome, AdminError> {
        if !confirmed {
            return Err(AdminError::ConfirmationRequired { action: "delete" });
        }
        if index >= self.products.len() {
            return Err(AdminError::IndexOutOfRange { index });
        }

        let removed = self.products.remove(index);
        self.edit_slot = match self.edit_slot {
            Some(slot) if slot == index => None,
            Some(slot) if slot > index => Some(slot - 1),
            other => other,
        };

        Ok(self.persist(format!("Removed product '{}'", removed.id)))
    }

    /// The working list as a pretty-printed `products.json`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Serialize`] if serialization fails.
    pub fn export_json(&self) -> Result<Export, AdminError> {
        Ok(Export {
            filename: EXPORT_FILENAME,
            contents: to_pretty_json(&self.products).map_err(AdminError::Serialize)?,
        })
    }

    /// Put the exported JSON on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ClipboardUnavailable`], whose message directs
    /// the user to the download instead.
    pub fn copy_json(&self, clipboard: &dyn Clipboard) -> Result<(), AdminError> {
        let export = self.export_json()?;
        clipboard
            .write_text(&export.contents)
            .map_err(AdminError::ClipboardUnavailable)
    }

    /// Replace the whole list with the products in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidImport`] for malformed JSON or an invalid
    /// product list; the working list is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<Outcome, AdminError> {
        let products = parse_product_list(text).map_err(AdminError::InvalidImport)?;
        let count = products.len();
        self.products = products;
        self.edit_slot = None;
        Ok(self.persist(format!("Imported {count} products")))
    }

    /// Replace the list with freshly fetched defaults, discarding edits.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ConfirmationRequired`] unless `confirmed`.
    pub fn reset(&mut self, defaults: Vec<Product>, confirmed: bool) -> Result<Outcome, AdminError> {
        if !confirmed {
            return Err(AdminError::ConfirmationRequired { action: "reset" });
        }
        let count = defaults.len();
        self.products = defaults;
        self.edit_slot = None;
        Ok(self.persist(format!("Reset to {count} default products")))
    }

    fn persist(&self, message: String) -> Outcome {
        let persistence = match self.persistence.persist(&self.products) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist product list");
                Persistence::Failed(e.to_string())
            }
        };
        Outcome {
            message,
            persistence,
        }
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
