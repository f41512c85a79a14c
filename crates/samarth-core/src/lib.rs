//! Domain core for the Samarth Overseas export catalog.
//!
//! Everything here is pure: the product model, reconciliation of persisted
//! edits against the defaults, the catalog/detail/gallery view models, the
//! admin editor state machine, and the contact form rules. I/O lives in
//! `samarth-store` and `samarth-contact`.

pub mod admin;
pub mod app_config;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod detail;
pub mod product;
pub mod reconcile;
mod uri;

use thiserror::Error;

pub use admin::{AdminEditor, AdminError, CatalogPersistence, Clipboard, Outcome, Persistence, ProductForm};
pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogQuery, CatalogView, Category, GalleryView, ViewState};
pub use config::{load_app_config, load_app_config_from_env};
pub use contact::{ContactError, ContactForm, ContactPrefill, ValidContact};
pub use detail::DetailView;
pub use product::{parse_product_list, slugify, Product, PLACEHOLDER_IMAGE};
pub use reconcile::merge;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an array of products, each with a non-empty name")]
    InvalidShape,

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
