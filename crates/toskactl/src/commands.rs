//! Command implementations for toskactl

use crate::client::DaemonClient;
use anyhow::Result;
use owo_colors::OwoColorize;
use toska_common::{MenuItemBody, NewMenuItem};

pub async fn menu(client: &DaemonClient) -> Result<()> {
    let items = client.menu().await?;
    print_items(&items);
    Ok(())
}

pub async fn search(client: &DaemonClient, query: &str) -> Result<()> {
    let items = client.search(query).await?;
    if items.is_empty() {
        println!("{}", format!("No menu items match '{}'", query).dimmed());
        return Ok(());
    }
    print_items(&items);
    Ok(())
}

pub async fn ask(client: &DaemonClient, question: &str) -> Result<()> {
    println!("{} {}", "you:".bold(), question);
    let reply = client.ask(question).await?;
    println!("{} {}", "toska:".bold().blue(), reply);
    Ok(())
}

pub async fn add(client: &DaemonClient, name: &str, price: i64, description: &str) -> Result<()> {
    let item = client
        .add(&NewMenuItem {
            name: name.to_string(),
            price,
            description: description.to_string(),
        })
        .await?;
    println!(
        "{} #{} {} ({})",
        "Added".green().bold(),
        item.id,
        item.name,
        item.price
    );
    Ok(())
}

pub async fn health(client: &DaemonClient) -> Result<()> {
    let health = client.health().await?;

    let status = if health.status == "healthy" {
        health.status.green().to_string()
    } else {
        health.status.red().to_string()
    };
    println!("Status:     {}", status);
    println!("Version:    {}", health.version);
    println!("Uptime:     {}s", health.uptime_seconds);
    println!("Menu items: {}", health.menu_items);
    println!(
        "QA model:   {}",
        if health.model_loaded {
            "loaded".green().to_string()
        } else {
            "not loaded (canned replies)".yellow().to_string()
        }
    );
    Ok(())
}

fn print_items(items: &[MenuItemBody]) {
    if items.is_empty() {
        println!("{}", "The menu is empty.".dimmed());
        return;
    }
    for item in items {
        println!(
            "{}  {}  {}",
            item.name.bold(),
            item.price.to_string().yellow(),
            item.description.dimmed()
        );
    }
}
