//! Content command handlers: FAQ, home copy and the CMS connection check.

use miramar_cms::Catalog;
use miramar_core::rich_text::strip_markup;
use serde_json::json;

use crate::{print_json, truncate, Output};

pub(crate) async fn run_faqs(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let faqs = catalog.faqs().await;
    if output == Output::Json {
        return print_json(&faqs);
    }
    if faqs.is_empty() {
        println!("no FAQs found");
        return Ok(());
    }
    for (index, faq) in faqs.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("Q: {}", faq.question);
        println!("A: {}", faq.answer.to_plain_text());
    }
    Ok(())
}

/// Print the home page copy. Falls back to the placeholder title and
/// description when the CMS has none.
pub(crate) async fn run_home(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let home = catalog.home_content().await;
    if output == Output::Json {
        return print_json(&json!({
            "title": home.display_title(),
            "description": home.display_description(),
            "cover": home.cover,
        }));
    }
    println!("{}", home.display_title());
    println!("{}", strip_markup(&home.display_description()));
    if let Some(cover) = &home.cover {
        println!("Cover: {}", cover.url);
    }
    Ok(())
}

/// Report which diagnostic endpoint answered.
///
/// # Errors
///
/// Returns an error if neither endpoint answers.
pub(crate) async fn run_check(catalog: &Catalog, output: Output) -> anyhow::Result<()> {
    let host = catalog.client().host().to_string();
    let Some(check) = catalog.check_collections().await else {
        anyhow::bail!("CMS at {host} did not answer; check STRAPI_HOST and STRAPI_TOKEN");
    };
    if output == Output::Json {
        return print_json(&json!({ "host": host, "endpoint": check.endpoint, "body": check.body }));
    }
    println!("CMS at {host} answered on {}", check.endpoint);
    println!("{}", truncate(&check.body.to_string(), 400));
    Ok(())
}
