// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::{ApiClient, TransactionFilters};
use crate::helpers::filter_by_query;
use crate::models::{
    CreateTransactionRequest, PurchaseItem, RecordPurchaseRequest, RecordSaleRequest, SaleItem,
    Transaction, TransactionStatus, TransactionType, UpdateTransactionRequest,
};
use crate::session::Session;
use crate::utils::{
    format_amount, format_id_number, maybe_print_json, month_range, parse_date, parse_decimal,
    parse_item, pretty_table,
};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("add", sub)) => add(api, session, sub)?,
        Some(("update", sub)) => update(api, session, sub)?,
        Some(("cancel", sub)) => cancel(api, session, sub)?,
        Some(("rm", sub)) => rm(api, session, sub)?,
        Some(("totals", sub)) => totals(api, session, sub)?,
        Some(("sale", sub)) => sale(api, session, sub)?,
        Some(("purchase", sub)) => purchase(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn parse_type(s: &str) -> Result<TransactionType> {
    match s.trim().to_lowercase().as_str() {
        "income" | "pemasukan" => Ok(TransactionType::Income),
        "expense" | "pengeluaran" => Ok(TransactionType::Expense),
        _ => anyhow::bail!("Invalid type '{}', expected Income or Expense", s),
    }
}

pub fn parse_status(s: &str) -> Result<TransactionStatus> {
    match s.trim().to_lowercase().as_str() {
        "pending" => Ok(TransactionStatus::Pending),
        "complete" => Ok(TransactionStatus::Complete),
        "cancel" => Ok(TransactionStatus::Cancel),
        _ => anyhow::bail!("Invalid status '{}', expected pending|complete|cancel", s),
    }
}

/// Server-side filters from the `tx list` / `export` flags. `--month`
/// expands to a start/end date pair; explicit `--start`/`--end` win.
pub fn filters_from(sub: &clap::ArgMatches) -> Result<TransactionFilters> {
    let mut filters = TransactionFilters::default();
    if let Some(month) = sub.get_one::<String>("month") {
        let (start, end) = month_range(month.trim())?;
        filters.start_date = Some(start.to_string());
        filters.end_date = Some(end.to_string());
    }
    if let Some(s) = sub.try_get_one::<String>("start").ok().flatten() {
        filters.start_date = Some(parse_date(s.trim())?.to_string());
    }
    if let Some(s) = sub.try_get_one::<String>("end").ok().flatten() {
        filters.end_date = Some(parse_date(s.trim())?.to_string());
    }
    if let Some(t) = sub.try_get_one::<String>("type").ok().flatten() {
        filters.r#type = Some(parse_type(t)?);
    }
    if let Some(c) = sub.try_get_one::<String>("category").ok().flatten() {
        filters.category = Some(c.trim().to_string());
    }
    if let Some(s) = sub.try_get_one::<String>("status").ok().flatten() {
        filters.status = Some(parse_status(s)?);
    }
    if let Some(n) = sub.try_get_one::<usize>("limit").ok().flatten() {
        filters.limit = Some(*n);
    }
    if let Some(n) = sub.try_get_one::<usize>("offset").ok().flatten() {
        filters.offset = Some(*n);
    }
    Ok(filters)
}

pub fn table_rows(transactions: &[Transaction]) -> Vec<Vec<String>> {
    transactions
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.transaction_date.format("%d/%m/%Y").to_string(),
                t.r#type.label().to_string(),
                t.category.clone().unwrap_or_else(|| "-".into()),
                format_amount(&t.amount, t.r#type),
                t.status.label().to_string(),
                t.description.clone().unwrap_or_else(|| "-".into()),
            ]
        })
        .collect()
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let business_id = session.require_business()?;
    let filters = filters_from(sub)?;
    let mut transactions = api.transactions(business_id, &filters)?.transactions;
    if let Some(q) = sub.get_one::<String>("query") {
        transactions = filter_by_query(&transactions, q);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &transactions)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Tanggal", "Tipe", "Kategori", "Jumlah", "Status", "Deskripsi"],
                table_rows(&transactions),
            )
        );
    }
    Ok(())
}

fn add(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    if amount.is_sign_negative() {
        anyhow::bail!("Amount must not be negative; pick Income or Expense instead");
    }
    let req = CreateTransactionRequest {
        r#type,
        amount,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
    };
    let t = api.create_transaction(business_id, &req)?;
    println!(
        "Recorded {} {} (id {})",
        t.r#type.label(),
        format_id_number(&t.amount),
        t.id
    );
    Ok(())
}

fn update(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let req = UpdateTransactionRequest {
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s.trim()).map(|d| d.to_string()))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
    };
    if req.date.is_none()
        && req.amount.is_none()
        && req.category.is_none()
        && req.description.is_none()
        && req.status.is_none()
    {
        anyhow::bail!("Nothing to update; pass at least one of --date/--amount/--category/--description/--status");
    }
    if let Some(amount) = req.amount {
        if amount.is_sign_negative() {
            anyhow::bail!("Amount must not be negative");
        }
    }
    let t = api.update_transaction(business_id, id, &req)?;
    println!("Updated transaction {}", t.id);
    Ok(())
}

fn cancel(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    api.cancel_transaction(business_id, id)?;
    println!("Cancelled transaction {}", id);
    Ok(())
}

fn rm(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    api.delete_transaction(business_id, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn totals(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let business_id = session.require_business()?;
    let filters = filters_from(sub)?;
    let totals = api.transaction_totals(
        business_id,
        filters.start_date.as_deref(),
        filters.end_date.as_deref(),
    )?;
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let rows = vec![vec![
            format!("Rp {}", format_id_number(&totals.income)),
            format!("Rp {}", format_id_number(&totals.expense)),
            format!("Rp {}", format_id_number(&totals.net)),
        ]];
        println!("{}", pretty_table(&["Pemasukan", "Pengeluaran", "Saldo"], rows));
    }
    Ok(())
}

fn sale(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let mut products = Vec::new();
    for raw in sub.get_many::<String>("item").unwrap() {
        let (product_id, quantity, price) = parse_item(raw)?;
        products.push(SaleItem {
            product_id,
            quantity,
            selling_price: price,
        });
    }
    let req = RecordSaleRequest {
        products,
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
    };
    let t = api.record_sale(business_id, &req)?;
    println!(
        "Recorded sale of {} item(s): {} (id {})",
        req.products.len(),
        format_amount(&t.amount, t.r#type),
        t.id
    );
    Ok(())
}

fn purchase(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let mut products = Vec::new();
    for raw in sub.get_many::<String>("item").unwrap() {
        let (product_id, quantity, price) = parse_item(raw)?;
        products.push(PurchaseItem {
            product_id,
            quantity,
            purchase_price: price,
        });
    }
    let req = RecordPurchaseRequest {
        products,
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
    };
    let t = api.record_purchase(business_id, &req)?;
    println!(
        "Recorded purchase of {} item(s): {} (id {})",
        req.products.len(),
        format_amount(&t.amount, t.r#type),
        t.id
    );
    Ok(())
}
