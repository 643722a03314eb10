//! Catalog command handlers: categories, products, search and the purchase
//! link.

use miramar_cms::{Catalog, SearchOutcome, SearchSession};
use miramar_core::{contact, CatalogRef, Category, Product};
use serde_json::json;

use crate::{print_json, truncate, Output};

const NAME_WIDTH: usize = 36;

pub(crate) async fn run_categories(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let categories = catalog.categories().await;
    if output == Output::Json {
        return print_json(&categories);
    }
    if categories.is_empty() {
        println!("no categories found; run `check` to verify the CMS connection");
        return Ok(());
    }
    print_categories(&categories);
    Ok(())
}

pub(crate) async fn run_products(
    catalog: &Catalog,
    category: Option<&str>,
    output: Output,
) -> anyhow::Result<()> {
    let products = catalog.products_by_category(category).await;
    if output == Output::Json {
        return print_json(&products);
    }
    if products.is_empty() {
        println!(
            "no products found{}",
            category
                .map(|c| format!(" in category {c}"))
                .unwrap_or_default()
        );
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

/// Show a category and its products.
///
/// # Errors
///
/// Returns an error if the category cannot be resolved.
pub(crate) async fn run_category(
    catalog: &Catalog,
    reference: &CatalogRef,
    output: Output,
) -> anyhow::Result<()> {
    let page = catalog.category_page(reference).await?;
    if output == Output::Json {
        return print_json(&page);
    }

    println!("Category: {} ({})", page.category.name, page.category.slug);
    if !page.category.description.is_empty() {
        println!("{}", page.category.description);
    }
    println!();
    if page.products.is_empty() {
        println!("this category has no products yet");
    } else {
        print_products(&page.products);
    }
    Ok(())
}

/// Show one product with every price entry.
///
/// # Errors
///
/// Returns an error if no endpoint knows the product.
pub(crate) async fn run_product(
    catalog: &Catalog,
    reference: &CatalogRef,
    output: Output,
) -> anyhow::Result<()> {
    let product = find_product(catalog, reference).await?;
    if output == Output::Json {
        return print_json(&product);
    }

    println!("Product: {} ({})", product.name, product.slug);
    if let Some(image) = &product.image {
        println!("Image: {}", image.url);
    }
    if !product.categories.is_empty() {
        let names: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
        println!("Categories: {}", names.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", miramar_core::rich_text::strip_markup(&product.description));
    }
    println!();
    println!("{:<12}{:<12}{:<12}DISCOUNT", "SIZE", "PRICE", "SALE");
    for price in &product.prices {
        let sale = price
            .discount_price
            .filter(|_| price.has_discount())
            .map_or_else(|| "\u{2014}".to_string(), |d| format!("${}", d.normalize()));
        println!(
            "{:<12}{:<12}{:<12}{}",
            price.size,
            format!("${}", price.price.normalize()),
            sale,
            discount_badge(price.discount_percentage())
        );
    }
    Ok(())
}

pub(crate) async fn run_discounts(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let products = catalog.discounted_products().await;
    if output == Output::Json {
        return print_json(&products);
    }
    if products.is_empty() {
        println!("no products on sale");
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

pub(crate) async fn run_featured(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let products = catalog.featured_products().await;
    if output == Output::Json {
        return print_json(&products);
    }
    if products.is_empty() {
        println!("no products to feature");
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

pub(crate) async fn run_search(
    session: &SearchSession,
    query: &str,
    output: Output,
) -> anyhow::Result<()> {
    let SearchOutcome::Results(products) = session.search(query).await else {
        anyhow::bail!("search for '{query}' was superseded by a newer query");
    };
    if output == Output::Json {
        return print_json(&products);
    }
    if products.is_empty() {
        println!("no products match '{query}'");
        return Ok(());
    }
    print_products(&products);
    Ok(())
}

/// Print the WhatsApp deep link a customer would follow to buy `reference`.
///
/// # Errors
///
/// Returns an error if no endpoint knows the product.
pub(crate) async fn run_contact(
    catalog: &Catalog,
    reference: &CatalogRef,
    phone: &str,
    output: Output,
) -> anyhow::Result<()> {
    let product = find_product(catalog, reference).await?;
    let message = contact::purchase_message(&product);
    let link = contact::whatsapp_link(phone, &message);
    if output == Output::Json {
        return print_json(&json!({ "product": product.id, "message": message, "link": link }));
    }
    println!("{message}");
    println!("{link}");
    Ok(())
}

async fn find_product(catalog: &Catalog, reference: &CatalogRef) -> anyhow::Result<Product> {
    catalog
        .product(reference)
        .await
        .ok_or_else(|| anyhow::anyhow!("product '{reference}' not found"))
}

fn print_categories(categories: &[Category]) {
    println!("{:<6}{:<24}{:<24}IMAGE", "ID", "NAME", "SLUG");
    for category in categories {
        let image = category.image.as_ref().map_or("\u{2014}", |i| i.url.as_str());
        println!(
            "{:<6}{:<24}{:<24}{}",
            category.id,
            truncate(&category.name, 20),
            truncate(&category.slug, 20),
            image
        );
    }
}

fn print_products(products: &[Product]) {
    println!(
        "{:<6}{:<40}{:<12}{:<10}CATEGORIES",
        "ID", "NAME", "PRICE", "DISCOUNT"
    );
    for product in products {
        let (price, discount) = product.primary_price().map_or_else(
            || ("\u{2014}".to_string(), String::new()),
            |p| {
                (
                    format!("${}", p.effective_price().normalize()),
                    discount_badge(p.discount_percentage()),
                )
            },
        );
        let categories: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
        println!(
            "{:<6}{:<40}{:<12}{:<10}{}",
            product.id,
            truncate(&product.name, NAME_WIDTH),
            price,
            discount,
            categories.join(", ")
        );
    }
}

fn discount_badge(percentage: u32) -> String {
    if percentage == 0 {
        "\u{2014}".to_string()
    } else {
        format!("-{percentage}%")
    }
}
