// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nusabiz::models::TransactionType;
use nusabiz::utils::{
    format_amount, format_date_long, format_id_number, is_valid_email, month_name, month_range,
    parse_item,
};
use rust_decimal::Decimal;

#[test]
fn id_number_grouping_uses_dots() {
    assert_eq!(format_id_number(&Decimal::from(0)), "0");
    assert_eq!(format_id_number(&Decimal::from(999)), "999");
    assert_eq!(format_id_number(&Decimal::from(1000)), "1.000");
    assert_eq!(format_id_number(&Decimal::from(1234567)), "1.234.567");
    assert_eq!(format_id_number(&Decimal::from(-1500)), "-1.500");
}

#[test]
fn fractions_use_a_comma() {
    let d: Decimal = "10.5".parse().unwrap();
    assert_eq!(format_id_number(&d), "10,5");
    // Trailing zeros are normalized away.
    let d: Decimal = "2500.00".parse().unwrap();
    assert_eq!(format_id_number(&d), "2.500");
}

#[test]
fn amounts_carry_a_sign_prefix() {
    assert_eq!(
        format_amount(&Decimal::from(1500), TransactionType::Income),
        "+ Rp 1.500"
    );
    assert_eq!(
        format_amount(&Decimal::from(250), TransactionType::Expense),
        "- Rp 250"
    );
}

#[test]
fn month_range_handles_leap_years_and_december() {
    let (start, end) = month_range("2024-02").unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let (start, end) = month_range("2025-12").unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

    assert!(month_range("2025-13").is_err());
    assert!(month_range("nope").is_err());
}

#[test]
fn long_dates_use_indonesian_month_names() {
    assert_eq!(month_name(1), "Januari");
    assert_eq!(month_name(12), "Desember");
    let date = "2025-08-17T10:00:00+07:00"
        .parse::<chrono::DateTime<chrono::FixedOffset>>()
        .unwrap();
    assert_eq!(format_date_long(&date), "17 Agustus 2025");
}

#[test]
fn email_validation_is_shallow_but_catches_garbage() {
    assert!(is_valid_email("owner@nusabiz.id"));
    assert!(is_valid_email("  padded@mail.co  "));
    assert!(!is_valid_email("no-at-sign"));
    assert!(!is_valid_email("two@@signs.id"));
    assert!(!is_valid_email("missing@tld"));
}

#[test]
fn sale_items_parse_id_qty_price() {
    let (id, qty, price) = parse_item("4:2:15000").unwrap();
    assert_eq!(id, 4);
    assert_eq!(qty, 2);
    assert_eq!(price, Decimal::from(15000));

    assert!(parse_item("4:2").is_err());
    assert!(parse_item("a:2:100").is_err());
    assert!(parse_item("4:0:100").is_err());
    assert!(parse_item("4:-1:100").is_err());
}
