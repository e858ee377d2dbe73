// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::api::{ApiClient, ProductForm};
use crate::helpers::{sort_products, ProductSort};
use crate::models::Product;
use crate::session::Session;
use crate::stock::{StockAdjuster, DEBOUNCE};
use crate::utils::{format_id_number, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("add", sub)) => add(api, session, sub)?,
        Some(("update", sub)) => update(api, session, sub)?,
        Some(("rm", sub)) => rm(api, session, sub)?,
        Some(("stock", sub)) => stock(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let business_id = session.require_business()?;
    let search = sub.get_one::<String>("search").map(|s| s.as_str());
    let mut products = api.products(business_id, search)?.products;
    if let Some(key) = sub.get_one::<String>("sort") {
        products = sort_products(&products, key.parse::<ProductSort>()?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &products)? {
        let rows = products
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    format!("{}/{}", p.current_stock, p.capacity()),
                    p.derived_status().label().to_string(),
                    p.purchase_price
                        .map(|v| format!("Rp {}", format_id_number(&v)))
                        .unwrap_or_else(|| "-".into()),
                    p.selling_price
                        .map(|v| format!("Rp {}", format_id_number(&v)))
                        .unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Nama", "Stok", "Status", "Harga Beli", "Harga Jual"],
                rows
            )
        );
    }
    Ok(())
}

fn form_from(sub: &clap::ArgMatches) -> Result<ProductForm> {
    let image = sub.get_one::<String>("image").map(std::path::PathBuf::from);
    if let Some(path) = &image {
        if !path.is_file() {
            anyhow::bail!("Image file {} does not exist", path.display());
        }
    }
    Ok(ProductForm {
        name: sub
            .get_one::<String>("name")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        current_stock: sub.get_one::<i64>("stock").copied(),
        purchase_price: sub
            .get_one::<String>("purchase-price")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        selling_price: sub
            .get_one::<String>("selling-price")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        image,
    })
}

fn add(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let form = form_from(sub)?;
    if form.name.is_none() {
        anyhow::bail!("Product name must not be empty");
    }
    if let Some(stock) = form.current_stock {
        if stock < 0 {
            anyhow::bail!("Stock must not be negative");
        }
    }
    let product = api.create_product(business_id, &form)?;
    println!("Added product '{}' (id {})", product.name, product.id);
    Ok(())
}

fn update(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let form = form_from(sub)?;
    if form.name.is_none()
        && form.current_stock.is_none()
        && form.purchase_price.is_none()
        && form.selling_price.is_none()
        && form.image.is_none()
    {
        anyhow::bail!("Nothing to update; pass at least one of --name/--stock/--purchase-price/--selling-price/--image");
    }
    let product = api.update_product(business_id, id, &form)?;
    println!("Updated product '{}' (id {})", product.name, product.id);
    Ok(())
}

fn rm(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    api.delete_product(business_id, id)?;
    println!("Removed product {}", id);
    Ok(())
}

fn stock(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let products = api.products(business_id, None)?.products;
    let product = products
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow::anyhow!("Product {} not found", id))?;

    if let Some(target) = sub.get_one::<i64>("set").copied() {
        return one_shot(api, business_id, &product, target);
    }
    if let Some(delta) = sub.get_one::<i64>("delta").copied() {
        return one_shot(api, business_id, &product, product.current_stock + delta);
    }
    interactive(api, business_id, &product)
}

/// Non-interactive path: same machine, with the debounce window skipped by
/// polling past the deadline.
fn one_shot(api: &ApiClient, business_id: i64, product: &Product, target: i64) -> Result<()> {
    let mut adjuster = StockAdjuster::for_product(product);
    let now = Instant::now();
    adjuster.set_value(target, now);
    match adjuster.poll(now + DEBOUNCE) {
        Some(req) => match api.adjust_stock(business_id, req.product_id, req.delta) {
            Ok(()) => {
                adjuster.commit(req.target);
                println!(
                    "Stock of '{}' is now {}/{}",
                    product.name,
                    req.target,
                    adjuster.base_stock()
                );
                Ok(())
            }
            Err(err) => {
                let reverted = adjuster.rollback();
                Err(anyhow::Error::new(err)
                    .context(format!("Stock update failed; still {}", reverted)))
            }
        },
        None => {
            println!(
                "No change: stock already {}/{}",
                adjuster.displayed(),
                adjuster.base_stock()
            );
            Ok(())
        }
    }
}

fn interactive(api: &ApiClient, business_id: i64, product: &Product) -> Result<()> {
    let mut adjuster = StockAdjuster::for_product(product);
    println!(
        "Stock of '{}': {}/{}",
        product.name,
        adjuster.displayed(),
        adjuster.base_stock()
    );
    println!("Commands: '+' add one, '-' remove one, a number to set, 'q' to finish");

    // One thread feeds stdin lines into a channel so the loop can keep
    // polling the debounce deadline between keystrokes.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        match line_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(line) => {
                let now = Instant::now();
                let input = line.trim();
                if input == "q" || input == "quit" {
                    break;
                }
                match input {
                    "+" => adjuster.increment(now),
                    "-" => adjuster.decrement(now),
                    "" => {}
                    other => {
                        if !adjuster.enter_text(other, now) {
                            println!("Not a number: '{}'", other);
                        }
                    }
                }
                println!("Stock: {}/{}", adjuster.displayed(), adjuster.base_stock());
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        flush_due(api, business_id, &mut adjuster);
    }

    if adjuster.displayed() != adjuster.confirmed() {
        println!(
            "Unsent change dropped; stock stays at {}",
            adjuster.confirmed()
        );
    }
    // Teardown disarms the timer; nothing fires after this point.
    adjuster.cancel();
    Ok(())
}

fn flush_due(api: &ApiClient, business_id: i64, adjuster: &mut StockAdjuster) {
    if let Some(req) = adjuster.poll(Instant::now()) {
        match api.adjust_stock(business_id, req.product_id, req.delta) {
            Ok(()) => {
                adjuster.commit(req.target);
                println!("Saved: stock {}", req.target);
            }
            Err(err) => {
                let reverted = adjuster.rollback();
                eprintln!("Stock update failed: {}", err);
                println!("Reverted to {}", reverted);
            }
        }
    }
}
