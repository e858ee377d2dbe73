// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over fetched transaction/product slices. Every function
//! here is total: defined for empty input and never panics.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Product, Transaction, TransactionStatus, TransactionType};

/// Running balance: income adds, expense subtracts.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |acc, t| match t.r#type {
        TransactionType::Income => acc + t.amount,
        TransactionType::Expense => acc - t.amount,
    })
}

/// Balance over transactions dated strictly before `cutoff`.
pub fn balance_before(transactions: &[Transaction], cutoff: NaiveDate) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |acc, t| {
        if t.transaction_date.date_naive() >= cutoff {
            return acc;
        }
        match t.r#type {
            TransactionType::Income => acc + t.amount,
            TransactionType::Expense => acc - t.amount,
        }
    })
}

/// Sum of completed transactions of one type.
pub fn total_by_type(transactions: &[Transaction], r#type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == r#type && t.status == TransactionStatus::Complete)
        .map(|t| t.amount)
        .sum()
}

/// Revenue for one calendar day: income amounts whose transaction date
/// falls on `day`. Time of day is ignored; the timestamp's own offset
/// decides which day it belongs to.
pub fn omzet_for_date(transactions: &[Transaction], day: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Income && t.transaction_date.date_naive() == day)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Twelve buckets for one calendar year, index 0 = January. Always twelve
/// entries; months without transactions stay at zero.
pub fn monthly_buckets(transactions: &[Transaction], year: i32) -> [MonthlyBucket; 12] {
    let mut buckets = [MonthlyBucket::default(); 12];
    for t in transactions {
        let date = t.transaction_date.date_naive();
        if date.year() != year {
            continue;
        }
        let bucket = &mut buckets[date.month0() as usize];
        match t.r#type {
            TransactionType::Income => bucket.income += t.amount,
            TransactionType::Expense => bucket.expense += t.amount,
        }
    }
    for bucket in &mut buckets {
        bucket.net = bucket.income - bucket.expense;
    }
    buckets
}

/// Relative change in percent, rounded half away from zero. A zero past
/// maps to 100 (growth from nothing) or 0. The denominator is |past| so a
/// negative baseline keeps the numerator's sign; that asymmetry is the
/// product rule, not an accident.
pub fn percentage_change(current: Decimal, past: Decimal) -> i64 {
    if past.is_zero() {
        return if current > Decimal::ZERO { 100 } else { 0 };
    }
    let pct = (current - past) / past.abs() * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    StockHighest,
    StockLowest,
    PriceHighest,
    PriceLowest,
}

impl std::str::FromStr for ProductSort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stok-tertinggi" => Ok(ProductSort::StockHighest),
            "stok-terendah" => Ok(ProductSort::StockLowest),
            "harga-tertinggi" => Ok(ProductSort::PriceHighest),
            "harga-terendah" => Ok(ProductSort::PriceLowest),
            _ => anyhow::bail!(
                "Unknown sort key '{}' (use stok-tertinggi|stok-terendah|harga-tertinggi|harga-terendah)",
                s
            ),
        }
    }
}

/// Stable sort into a new vector; the input is left untouched. A missing
/// selling price sorts as zero.
pub fn sort_products(products: &[Product], key: ProductSort) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        ProductSort::StockHighest => sorted.sort_by(|a, b| b.current_stock.cmp(&a.current_stock)),
        ProductSort::StockLowest => sorted.sort_by(|a, b| a.current_stock.cmp(&b.current_stock)),
        ProductSort::PriceHighest => sorted.sort_by(|a, b| {
            b.selling_price
                .unwrap_or_default()
                .cmp(&a.selling_price.unwrap_or_default())
        }),
        ProductSort::PriceLowest => sorted.sort_by(|a, b| {
            a.selling_price
                .unwrap_or_default()
                .cmp(&b.selling_price.unwrap_or_default())
        }),
    }
    sorted
}

/// Case-insensitive search across category, description, type label, and
/// the formatted amount.
pub fn filter_by_query(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|t| {
            t.category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
                || t.description
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
                || t.r#type.label().to_lowercase().contains(&needle)
                || crate::utils::format_id_number(&t.amount).contains(&needle)
        })
        .cloned()
        .collect()
}
