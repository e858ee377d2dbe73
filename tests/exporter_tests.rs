// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::DateTime;
use nusabiz::commands::exporter;
use nusabiz::models::{Transaction, TransactionStatus, TransactionType};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            business_id: 9,
            transaction_date: DateTime::parse_from_rfc3339("2025-01-15T09:30:00+07:00").unwrap(),
            r#type: TransactionType::Income,
            category: Some("Penjualan".into()),
            amount: Decimal::from(1500),
            description: Some("Jual kopi".into()),
            status: TransactionStatus::Complete,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        },
        Transaction {
            id: 2,
            business_id: 9,
            transaction_date: DateTime::parse_from_rfc3339("2025-02-03T14:00:00+07:00").unwrap(),
            r#type: TransactionType::Expense,
            category: None,
            amount: Decimal::from(250),
            description: None,
            status: TransactionStatus::Pending,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        },
    ]
}

#[test]
fn csv_export_keeps_the_fixed_column_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    exporter::write_file(&path, "csv", &sample()).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Tanggal,Tipe Transaksi,Kategori,Jumlah,Jumlah (Format),Deskripsi"
    );
    let first = lines.next().unwrap();
    assert!(
        first.starts_with("15 Januari 2025,Pemasukan,Penjualan,1500,+ Rp 1.500,"),
        "got '{}'",
        first
    );
    let second = lines.next().unwrap();
    assert!(
        second.contains("3 Februari 2025,Pengeluaran,-,250,- Rp 250,-"),
        "got '{}'",
        second
    );
}

#[test]
fn xlsx_export_writes_a_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    exporter::write_file(&path, "xlsx", &sample()).unwrap();
    let meta = std::fs::metadata(&path).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn unknown_format_is_rejected_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xml");
    assert!(exporter::write_file(&path, "xml", &sample()).is_err());
    assert!(!path.exists());
}
