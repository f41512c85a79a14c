//! Admin commands: each one loads the reconciled working list, applies one
//! editor operation, and persists through the product store.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use samarth_core::{AdminEditor, AppConfig, Outcome, Persistence, ProductForm};
use samarth_store::ProductStore;

use crate::clipboard::SystemClipboard;

/// Product fields accepted by `add` and `edit`. Omitted fields keep their
/// current value when editing.
#[derive(Debug, Default, Args)]
pub struct ProductArgs {
    /// Product id; derived from the name when blank
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub subcategory: Option<String>,
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub packaging: Option<String>,
    /// Minimum order quantity
    #[arg(long)]
    pub moq: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Image path; the placeholder is used when blank
    #[arg(long)]
    pub image: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

impl ProductArgs {
    pub(crate) fn apply_to(self, form: &mut ProductForm) {
        let fields = [
            (self.id, &mut form.id),
            (self.name, &mut form.name),
            (self.category, &mut form.category),
            (self.subcategory, &mut form.subcategory),
            (self.origin, &mut form.origin),
            (self.packaging, &mut form.packaging),
            (self.moq, &mut form.moq),
            (self.summary, &mut form.summary),
            (self.description, &mut form.description),
            (self.image, &mut form.image),
            (self.tags, &mut form.tags),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// List the working list with row indexes
    List,
    /// Add a product
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Edit the product at a row index
    Edit {
        /// Row index from `admin list`
        index: usize,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete the product at a row index
    Delete {
        /// Row index from `admin list`
        index: usize,
        /// Confirm the deletion; there is no undo
        #[arg(long)]
        yes: bool,
    },
    /// Write the working list as pretty-printed JSON
    Export {
        /// Output file, or `-` for stdout
        #[arg(long, short, default_value = "products.json")]
        output: PathBuf,
    },
    /// Copy the working list JSON to the system clipboard
    Copy,
    /// Replace the working list with a JSON file
    Import {
        /// JSON file holding an array of products
        file: PathBuf,
    },
    /// Discard all edits and restore the default products
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Print the outcome; a failed write is an error because the change dies
/// with the process.
fn report(outcome: &Outcome) -> anyhow::Result<()> {
    println!("{}", outcome.message);
    match &outcome.persistence {
        Persistence::Saved => Ok(()),
        Persistence::Failed(reason) => anyhow::bail!("change was not saved: {reason}"),
    }
}

pub(crate) async fn run(config: &AppConfig, command: AdminCommands) -> anyhow::Result<()> {
    let store = Arc::new(ProductStore::from_config(config)?);
    let products = store.load_working_list().await;
    let mut editor = AdminEditor::new(products, Arc::clone(&store));

    match command {
        AdminCommands::List => {
            println!(
                "{:<6}{:<28}{:<32}{:<16}SUBCATEGORY",
                "INDEX", "ID", "NAME", "CATEGORY"
            );
            for row in editor.rows() {
                println!(
                    "{:<6}{:<28}{:<32}{:<16}{}",
                    row.index, row.id, row.name, row.category, row.subcategory
                );
            }
        }
        AdminCommands::Add { product } => {
            let mut form = ProductForm::default();
            product.apply_to(&mut form);
            report(&editor.submit(&form)?)?;
        }
        AdminCommands::Edit { index, product } => {
            let mut form = editor.begin_edit(index)?;
            product.apply_to(&mut form);
            report(&editor.submit(&form)?)?;
        }
        AdminCommands::Delete { index, yes } => {
            report(&editor.delete(index, yes)?)?;
        }
        AdminCommands::Export { output } => {
            let export = editor.export_json()?;
            if output.as_os_str() == "-" {
                println!("{}", export.contents);
            } else {
                std::fs::write(&output, &export.contents)?;
                println!("wrote {} products to {}", editor.products().len(), output.display());
            }
        }
        AdminCommands::Copy => {
            editor.copy_json(&SystemClipboard)?;
            println!("JSON copied to clipboard.");
        }
        AdminCommands::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            report(&editor.import_json(&text)?)?;
        }
        AdminCommands::Reset { yes } => {
            if !yes {
                anyhow::bail!("reset discards all edits; re-run with --yes to confirm");
            }
            let defaults = store.fetch_defaults().await;
            report(&editor.reset(defaults, true)?)?;
        }
    }

    Ok(())
}
