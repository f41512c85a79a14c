//! Read-only catalog commands over the reconciled working list.

use clap::Subcommand;
use samarth_core::catalog::category_summaries;
use samarth_core::{AppConfig, CatalogQuery, CatalogView, Category, DetailView, GalleryView};
use samarth_store::ProductStore;

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List products in a category, optionally narrowed by subcategory and text
    List {
        /// Category name (Rice, Confectionery, Spices, Agricultural)
        #[arg(long, default_value = "Rice")]
        category: String,
        /// Subcategory tab; "All" or omitted selects every subcategory
        #[arg(long)]
        subcategory: Option<String>,
        /// Case-insensitive text search over name, summary, and tags
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show item counts for every category
    Categories,
    /// Show the gallery tiles
    Gallery,
    /// Show one product's detail page
    Show {
        /// Product id
        id: String,
    },
}

pub(crate) async fn run(config: &AppConfig, command: CatalogCommands) -> anyhow::Result<()> {
    let store = ProductStore::from_config(config)?;
    let products = store.load_working_list().await;

    match command {
        CatalogCommands::List {
            category,
            subcategory,
            query,
        } => {
            let category: Category = category.parse()?;
            let query = CatalogQuery::new(category)
                .with_subcategory(subcategory.as_deref())
                .with_text(query.as_deref());
            print_catalog(&CatalogView::build(&products, false, &query));
        }
        CatalogCommands::Categories => {
            println!("{:<16}{:<6}ITEMS", "CATEGORY", "ICON");
            for summary in category_summaries(&products, Category::default()) {
                println!(
                    "{:<16}{:<6}{}",
                    summary.category, summary.icon, summary.count
                );
            }
        }
        CatalogCommands::Gallery => {
            let gallery = GalleryView::build(&products, false);
            if let Some(message) = gallery.message {
                println!("{message}");
            }
            for tile in &gallery.tiles {
                println!("{:<32}{}", tile.caption, tile.image);
            }
        }
        CatalogCommands::Show { id } => print_detail(&DetailView::build(&products, &id, false)),
    }

    Ok(())
}

fn print_catalog(view: &CatalogView) {
    println!(
        "{} | {}",
        view.category,
        view.subcategory_tabs.join(" · ")
    );
    if let Some(message) = view.message {
        println!("{message}");
        return;
    }

    println!("{}", view.count_label);
    println!("{:<28}{:<20}NAME", "ID", "LABEL");
    for card in &view.items {
        println!("{:<28}{:<20}{}", card.id, card.eyebrow, card.name);
    }
}

fn print_detail(view: &DetailView) {
    match view {
        DetailView::Loading => println!("Loading products..."),
        DetailView::NotFound { message, back_link } => {
            println!("{message}");
            println!("Back to catalog: {back_link}");
        }
        DetailView::Found(detail) => {
            println!("{}", detail.eyebrow);
            println!("{} ({})", detail.name, detail.id);
            println!("image: {}", detail.image);
            if let Some(body) = &detail.body {
                println!();
                println!("{body}");
            }
            println!();
            for field in &detail.fields {
                println!("{:<13}{}", format!("{}:", field.label), field.value);
            }
            if !detail.related.is_empty() {
                println!();
                println!("Other products:");
                for card in &detail.related {
                    println!("  {} ({})", card.name, card.detail_path);
                }
            }
        }
    }
}
