// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::api::ApiClient;
use crate::models::Transaction;
use crate::session::Session;
use crate::utils::{format_amount, format_date_long};

// Fixed export layout: column order, sheet name, and widths.
const HEADERS: [&str; 6] = [
    "Tanggal",
    "Tipe Transaksi",
    "Kategori",
    "Jumlah",
    "Jumlah (Format)",
    "Deskripsi",
];
const COLUMN_WIDTHS: [f64; 6] = [15.0, 15.0, 20.0, 15.0, 20.0, 40.0];
const SHEET_NAME: &str = "Transaksi";

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(api, session, sub),
        _ => Ok(()),
    }
}

fn export_transactions(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let filters = super::transactions::filters_from(sub)?;
    let transactions = api.transactions(business_id, &filters)?.transactions;
    if transactions.is_empty() {
        anyhow::bail!("No transactions to export");
    }

    let out = match sub.get_one::<String>("out") {
        Some(path) => path.clone(),
        None => format!("Transaksi_{}.{}", Local::now().format("%Y-%m-%d"), fmt),
    };
    write_file(Path::new(&out), &fmt, &transactions)?;
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}

/// Write the list in the given format; unknown formats are an error before
/// anything is created on disk.
pub fn write_file(path: &Path, format: &str, transactions: &[Transaction]) -> Result<()> {
    match format {
        "xlsx" => write_xlsx(path, transactions),
        "csv" => write_csv(path, transactions),
        other => anyhow::bail!("Unknown format: {} (use xlsx|csv)", other),
    }
}

fn row_values(t: &Transaction) -> [String; 6] {
    [
        format_date_long(&t.transaction_date),
        t.r#type.label().to_string(),
        t.category.clone().unwrap_or_else(|| "-".into()),
        t.amount.to_string(),
        format_amount(&t.amount, t.r#type),
        t.description.clone().unwrap_or_else(|| "-".into()),
    ]
}

fn write_xlsx(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *header, &bold)?;
        sheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }
    for (row, t) in transactions.iter().enumerate() {
        let r = row as u32 + 1;
        let values = row_values(t);
        sheet.write(r, 0, values[0].as_str())?;
        sheet.write(r, 1, values[1].as_str())?;
        sheet.write(r, 2, values[2].as_str())?;
        // The raw amount stays numeric so spreadsheet formulas work on it.
        sheet.write(r, 3, t.amount.to_f64().unwrap_or_default())?;
        sheet.write(r, 4, values[4].as_str())?;
        sheet.write(r, 5, values[5].as_str())?;
    }
    workbook
        .save(path)
        .with_context(|| format!("Write spreadsheet {}", path.display()))?;
    Ok(())
}

fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("Open CSV {}", path.display()))?;
    wtr.write_record(HEADERS)?;
    for t in transactions {
        wtr.write_record(row_values(t))?;
    }
    wtr.flush()?;
    Ok(())
}
