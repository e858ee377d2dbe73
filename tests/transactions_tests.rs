// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nusabiz::cli;
use nusabiz::commands::transactions::{filters_from, parse_status, parse_type};
use nusabiz::models::{TransactionStatus, TransactionType};

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["nusabiz", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn month_expands_to_a_date_range() {
    let m = list_matches(&["--month", "2025-02"]);
    let filters = filters_from(&m).unwrap();
    assert_eq!(filters.start_date.as_deref(), Some("2025-02-01"));
    assert_eq!(filters.end_date.as_deref(), Some("2025-02-28"));
}

#[test]
fn explicit_dates_override_the_month() {
    let m = list_matches(&["--month", "2025-02", "--start", "2025-02-10"]);
    let filters = filters_from(&m).unwrap();
    assert_eq!(filters.start_date.as_deref(), Some("2025-02-10"));
    assert_eq!(filters.end_date.as_deref(), Some("2025-02-28"));
}

#[test]
fn type_status_and_limit_are_parsed() {
    let m = list_matches(&["--type", "income", "--status", "complete", "--limit", "25"]);
    let filters = filters_from(&m).unwrap();
    assert_eq!(filters.r#type, Some(TransactionType::Income));
    assert_eq!(filters.status, Some(TransactionStatus::Complete));
    assert_eq!(filters.limit, Some(25));
    let query = filters.to_query();
    assert!(query.contains(&("type", "Income".to_string())));
    assert!(query.contains(&("status", "complete".to_string())));
    assert!(query.contains(&("limit", "25".to_string())));
}

#[test]
fn bad_month_and_type_are_rejected() {
    let m = list_matches(&["--month", "2025-13"]);
    assert!(filters_from(&m).is_err());
    let m = list_matches(&["--type", "profit"]);
    assert!(filters_from(&m).is_err());
}

#[test]
fn type_and_status_parsers_accept_both_languages() {
    assert_eq!(parse_type("Income").unwrap(), TransactionType::Income);
    assert_eq!(parse_type("pemasukan").unwrap(), TransactionType::Income);
    assert_eq!(parse_type("Expense").unwrap(), TransactionType::Expense);
    assert!(parse_type("both").is_err());

    assert_eq!(parse_status("pending").unwrap(), TransactionStatus::Pending);
    assert_eq!(parse_status("CANCEL").unwrap(), TransactionStatus::Cancel);
    assert!(parse_status("done").is_err());
}
