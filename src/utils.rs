// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::TransactionType;

const UA: &str = concat!(
    "nusabiz/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/nusabiz)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// First and last day of a YYYY-MM month.
pub fn month_range(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))?;
    Ok((start, end))
}

pub const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTHS_ID
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// "15 Januari 2025", the long id-ID date used in exports.
pub fn format_date_long(date: &chrono::DateTime<chrono::FixedOffset>) -> String {
    let d = date.date_naive();
    format!("{} {} {}", d.day(), month_name(d.month()), d.year())
}

/// Group digits the id-ID way: dots for thousands, comma before any
/// fractional part.
pub fn format_id_number(d: &Decimal) -> String {
    let normalized = d.normalize();
    let plain = normalized.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if normalized.is_sign_negative() && !normalized.is_zero() {
        grouped.push('-');
    }
    for (i, b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*b as char);
    }
    if let Some(f) = frac_part {
        grouped.push(',');
        grouped.push_str(f);
    }
    grouped
}

/// "+ Rp 1.000" for income, "- Rp 1.000" for expense.
pub fn format_amount(amount: &Decimal, r#type: TransactionType) -> String {
    let prefix = match r#type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };
    format!("{} Rp {}", prefix, format_id_number(amount))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

/// Parse a `PRODUCT_ID:QTY:PRICE` item as used by `tx sale` / `tx purchase`.
pub fn parse_item(s: &str) -> Result<(i64, i64, Decimal)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        anyhow::bail!("Invalid item '{}', expected PRODUCT_ID:QTY:PRICE", s);
    }
    let product_id = parts[0]
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid product id '{}'", parts[0]))?;
    let quantity = parts[1]
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid quantity '{}'", parts[1]))?;
    if quantity <= 0 {
        anyhow::bail!("Quantity must be positive in item '{}'", s);
    }
    let price = parse_decimal(parts[2].trim())?;
    Ok((product_id, quantity, price))
}
