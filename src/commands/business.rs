// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiClient;
use crate::models::CreateBusinessRequest;
use crate::session::Session;
use crate::utils::{format_id_number, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(api, session, sub)?,
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("select", sub)) => select(api, session, sub)?,
        Some(("overview", sub)) => overview(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Business name must not be empty");
    }
    let req = CreateBusinessRequest {
        business_name: name,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        location: sub.get_one::<String>("location").map(|s| s.to_string()),
        current_balance: sub
            .get_one::<String>("balance")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
    };
    let business = api.create_business(&req)?;

    let mut updated = session.clone();
    updated.business_id = Some(business.id);
    updated.save()?;
    println!(
        "Created business '{}' (id {}) and made it active",
        business.business_name, business.id
    );
    Ok(())
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let businesses = api.businesses()?;
    if !maybe_print_json(json_flag, jsonl_flag, &businesses)? {
        let rows = businesses
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    if session.business_id == Some(b.id) {
                        "*".to_string()
                    } else {
                        String::new()
                    },
                    b.business_name.clone(),
                    b.category.clone().unwrap_or_default(),
                    b.location.clone().unwrap_or_default(),
                    format!("Rp {}", format_id_number(&b.current_balance)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Aktif", "Nama", "Kategori", "Lokasi", "Saldo"], rows)
        );
    }
    Ok(())
}

fn select(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let businesses = api.businesses()?;
    let business = businesses
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow::anyhow!("Business {} not found for this account", id))?;

    let mut updated = session.clone();
    updated.business_id = Some(business.id);
    updated.save()?;
    println!("Active business: '{}' (id {})", business.business_name, id);
    Ok(())
}

fn overview(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let business_id = session.require_business()?;
    let overview = api.business_overview(business_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &overview)? {
        let rows = vec![
            vec!["Nama".into(), overview.business.business_name.clone()],
            vec![
                "Saldo".into(),
                format!("Rp {}", format_id_number(&overview.business.current_balance)),
            ],
            vec!["Produk".into(), overview.total_products.to_string()],
            vec!["Transaksi".into(), overview.total_transactions.to_string()],
            vec![
                "Total Pemasukan".into(),
                format!("Rp {}", format_id_number(&overview.total_income)),
            ],
            vec![
                "Total Pengeluaran".into(),
                format!("Rp {}", format_id_number(&overview.total_expense)),
            ],
            vec!["Stok Rendah".into(), overview.low_stock_products.to_string()],
        ];
        println!("{}", pretty_table(&["Ringkasan", "Nilai"], rows));
    }
    Ok(())
}
