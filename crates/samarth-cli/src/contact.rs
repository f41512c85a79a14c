use clap::Subcommand;
use samarth_contact::{ContactClient, Delivery};
use samarth_core::contact::prefill;
use samarth_core::{AppConfig, ContactForm};
use samarth_store::ProductStore;

#[derive(Debug, Subcommand)]
pub enum ContactCommands {
    /// Validate and deliver an inquiry
    Send {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// rice, confectionery, spices, agricultural, or other
        #[arg(long)]
        product_interest: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Show the form values a product link would pre-fill
    Prefill {
        /// Product id
        #[arg(long)]
        product_id: String,
    },
}

pub(crate) async fn run(config: &AppConfig, command: ContactCommands) -> anyhow::Result<()> {
    match command {
        ContactCommands::Send {
            name,
            company,
            email,
            phone,
            product_interest,
            message,
        } => {
            let form = ContactForm {
                name: name.unwrap_or_default(),
                company: company.unwrap_or_default(),
                email: email.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                product_interest: product_interest.unwrap_or_default(),
                message: message.unwrap_or_default(),
            };
            let client = ContactClient::from_config(config)?;
            let delivery = match client.deliver(&form).await {
                Ok(delivery) => delivery,
                Err(e) => anyhow::bail!(e.user_message()),
            };
            println!("{}", delivery.message());
            if let Delivery::EmailDraft { uri, .. } = &delivery {
                println!("{uri}");
            }
        }
        ContactCommands::Prefill { product_id } => {
            let store = ProductStore::from_config(config)?;
            let products = store.load_working_list().await;
            match prefill(&products, &product_id) {
                Some(values) => {
                    println!("product interest: {}", values.product_interest);
                    println!("message: {}", values.message);
                }
                None => println!("no product with id {product_id:?}; the form starts empty"),
            }
        }
    }

    Ok(())
}
