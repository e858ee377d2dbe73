// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::api::{ApiClient, TransactionFilters};
use crate::helpers::{
    balance, balance_before, monthly_buckets, omzet_for_date, percentage_change, MonthlyBucket,
};
use crate::models::Transaction;
use crate::session::Session;
use crate::utils::{format_id_number, maybe_print_json, month_name, pretty_table};

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub saldo: Decimal,
    pub saldo_last_month: Decimal,
    pub saldo_change_pct: i64,
    pub omzet_today: Decimal,
    pub omzet_yesterday: Decimal,
    pub omzet_change_pct: i64,
    pub year: i32,
    pub monthly: Vec<MonthlyBucket>,
}

/// The web dashboard's cards and monthly chart, derived from one
/// transaction fetch.
pub fn summarize(transactions: &[Transaction], today: NaiveDate, year: i32) -> DashboardSummary {
    let first_of_month = today.with_day(1).unwrap_or(today);
    let saldo = balance(transactions);
    let saldo_last_month = balance_before(transactions, first_of_month);
    let omzet_today = omzet_for_date(transactions, today);
    let omzet_yesterday = today
        .pred_opt()
        .map(|d| omzet_for_date(transactions, d))
        .unwrap_or_default();
    DashboardSummary {
        saldo,
        saldo_last_month,
        saldo_change_pct: percentage_change(saldo, saldo_last_month),
        omzet_today,
        omzet_yesterday,
        omzet_change_pct: percentage_change(omzet_today, omzet_yesterday),
        year,
        monthly: monthly_buckets(transactions, year).to_vec(),
    }
}

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let business_id = session.require_business()?;

    let today = Local::now().date_naive();
    let year = m.get_one::<i32>("year").copied().unwrap_or(today.year());
    let transactions = api
        .transactions(business_id, &TransactionFilters::default())?
        .transactions;
    let summary = summarize(&transactions, today, year);

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    println!(
        "Saldo Saat Ini : Rp {}  ({} {}% vs bulan lalu Rp {})",
        format_id_number(&summary.saldo),
        trend_mark(summary.saldo >= summary.saldo_last_month),
        summary.saldo_change_pct,
        format_id_number(&summary.saldo_last_month),
    );
    println!(
        "Omzet Hari Ini : Rp {}  ({} {}% vs kemarin Rp {})",
        format_id_number(&summary.omzet_today),
        trend_mark(summary.omzet_today >= summary.omzet_yesterday),
        summary.omzet_change_pct,
        format_id_number(&summary.omzet_yesterday),
    );

    let rows = summary
        .monthly
        .iter()
        .enumerate()
        .map(|(i, b)| {
            vec![
                month_name(i as u32 + 1).to_string(),
                format_id_number(&b.income),
                format_id_number(&b.expense),
                format_id_number(&b.net),
            ]
        })
        .collect();
    println!();
    println!("Tahun {}", summary.year);
    println!(
        "{}",
        pretty_table(&["Bulan", "Pemasukan", "Pengeluaran", "Saldo"], rows)
    );
    Ok(())
}

fn trend_mark(up: bool) -> &'static str {
    if up {
        "naik"
    } else {
        "turun"
    }
}
