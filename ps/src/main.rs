use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use productshelf::cli::{Cli, Command};
use productshelf::config::Config;
use productshelf::{Catalog, LayoutDirection, Product, SelectionSet, SlotStore};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn print_product(product: &Product, selected: bool) {
    let marker = if selected { "●".green() } else { "○".dimmed() };
    println!(
        "{} {:>4}  {} {} {}",
        marker,
        product.id.to_string().yellow(),
        product.name.bold(),
        format!("({})", product.brand).dimmed(),
        format!("[{}]", product.category).cyan()
    );
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("productshelf starting");

    match cli.command {
        Command::Categories => {
            let catalog = Catalog::load(&config.catalog_path)?;
            for category in catalog.categories() {
                println!("{}", category);
            }
        }
        Command::List { category, search } => {
            let catalog = Catalog::load(&config.catalog_path)?;
            let store = SlotStore::open(&config.store_path)?;
            let selection = SelectionSet::load(store);

            let products = catalog.filter(category.as_deref(), search.as_deref());
            if products.is_empty() {
                println!("{}", "No products match".dimmed());
            }
            for product in products {
                print_product(product, selection.is_selected(product.id));
            }
        }
        Command::Toggle { id } => {
            let catalog = Catalog::load(&config.catalog_path)?;
            let product = catalog
                .get(id)
                .ok_or_else(|| eyre::eyre!("No product with id {} in the catalog", id))?;

            let store = SlotStore::open(&config.store_path)?;
            let mut selection = SelectionSet::load(store);
            if selection.toggle(product)? {
                println!("{} Selected: {}", "✓".green(), product.name);
            } else {
                println!("{} Deselected: {}", "✗".red(), product.name);
            }
        }
        Command::Remove { index } => {
            let store = SlotStore::open(&config.store_path)?;
            let mut selection = SelectionSet::load(store);
            if selection.remove(index)? {
                println!("{} Removed entry {}", "✓".green(), index);
            } else {
                println!("{}", format!("Index {} out of range, nothing removed", index).dimmed());
            }
        }
        Command::Clear => {
            let store = SlotStore::open(&config.store_path)?;
            let mut selection = SelectionSet::load(store);
            selection.clear()?;
            println!("{} Selection cleared", "✓".green());
        }
        Command::Selected => {
            let store = SlotStore::open(&config.store_path)?;
            let selection = SelectionSet::load(store);
            if selection.is_empty() {
                println!("{}", "No products selected".dimmed());
            } else {
                for (index, product) in selection.products().iter().enumerate() {
                    println!(
                        "{:>3}. {} {}",
                        index,
                        product.name.bold(),
                        format!("({})", product.brand).dimmed()
                    );
                }
            }
        }
        Command::Layout { direction } => {
            let store = SlotStore::open(&config.store_path)?;
            match direction {
                Some(value) => {
                    let dir = LayoutDirection::parse(&value);
                    store.set_layout_direction(dir)?;
                    println!("{} Layout direction set to {}", "✓".green(), dir.as_str().cyan());
                }
                None => {
                    println!("{}", store.layout_direction().as_str());
                }
            }
        }
    }

    Ok(())
}
