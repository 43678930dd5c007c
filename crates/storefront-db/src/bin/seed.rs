//! # Seed Data Generator
//!
//! Populates the database with demo data for local development.
//!
//! ## Usage
//! ```bash
//! # 3 stores (default)
//! cargo run -p storefront-db --bin seed
//!
//! # Custom amount
//! cargo run -p storefront-db --bin seed -- --stores 10
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! ## Generated Data
//! - One manager account (`manager@storefront.dev`, no usable password)
//! - The shared category set below
//! - `--stores` stores, each stocked with one product per catalog entry
//!
//! Prices and stock levels are derived from the entry index, so runs are
//! reproducible.

use std::env;

use storefront_core::{CategoryDraft, Price, ProductDraft, Role, StoreDraft, UserDraft};
use storefront_db::{Database, DbConfig};

/// Category name and description
const CATEGORIES: &[(&str, &str)] = &[
    ("Beverages", "Sodas, juices and water"),
    ("Snacks", "Chips, candy and cookies"),
    ("Dairy", "Milk, cheese and yogurt"),
    ("Pantry", "Pasta, rice and canned goods"),
];

/// Product name and the indexes of its categories in `CATEGORIES`
const CATALOG: &[(&str, &[usize])] = &[
    ("Sparkling Water 1L", &[0]),
    ("Orange Juice 1L", &[0]),
    ("Iced Tea 500ml", &[0]),
    ("Sea Salt Chips", &[1]),
    ("Dark Chocolate Bar", &[1]),
    ("Oat Cookies", &[1, 3]),
    ("Whole Milk 1L", &[2, 0]),
    ("Greek Yogurt", &[2]),
    ("Aged Cheddar", &[2]),
    ("Spaghetti 500g", &[3]),
    ("Basmati Rice 1kg", &[3]),
    ("Chopped Tomatoes", &[3]),
];

/// Street names cycled through for store locations
const STREETS: &[&str] = &["Main St", "Harbour Rd", "Market Sq", "Station Ave"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut stores: usize = 3;
    let mut db_path = String::from("./storefront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--stores" | "-s" => {
                if i + 1 < args.len() {
                    stores = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --stores <N>   Number of stores to generate (default: 3)");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Stores:   {}", stores);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let manager = db
        .users()
        .insert(
            &UserDraft {
                email: "manager@storefront.dev".to_string(),
                role: Some(Role::Manager),
                is_staff: true,
                is_active: true,
                password: None,
            },
            "!",
        )
        .await?;
    println!("✓ Created manager #{} ({})", manager.id, manager.email);

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = db
            .categories()
            .insert(&CategoryDraft {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?;
        category_ids.push(category.id);
    }
    println!("✓ Created {} categories", category_ids.len());

    let mut generated = 0;
    for store_idx in 0..stores {
        let store = db
            .stores()
            .insert(&StoreDraft {
                name: format!("Storefront #{}", store_idx + 1),
                locations: format!(
                    "{} {}",
                    STREETS[store_idx % STREETS.len()],
                    store_idx * 7 + 1
                ),
                manager: manager.id,
            })
            .await?;

        for (product_idx, (name, links)) in CATALOG.iter().enumerate() {
            let draft = generate_product(name, links, &category_ids, &store.id, product_idx);
            if let Err(e) = db.products().insert(&draft).await {
                eprintln!("Failed to insert {}: {}", draft.name, e);
                continue;
            }
            generated += 1;
        }

        println!("  {} stocked", store.name);
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} stores and {} products in {:?}",
        stores, generated, elapsed
    );
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Builds one product for a store.
fn generate_product(
    name: &str,
    links: &[usize],
    category_ids: &[i64],
    store_id: &str,
    seed: usize,
) -> ProductDraft {
    // $0.99 - $12.99
    let price_cents = 99 + ((seed * 137) % 1200) as i64;

    ProductDraft {
        name: name.to_string(),
        description: format!("{} (demo item)", name),
        price: Price::from_cents(price_cents),
        quantity_in_stock: ((seed * 31) % 101) as i64,
        availability_status: seed % 5 != 4,
        categories: links
            .iter()
            .filter_map(|idx| category_ids.get(*idx).copied())
            .collect(),
        store: store_id.to_string(),
    }
}
