// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::api::ApiClient;
use crate::chat::{role_label, ChatSession};
use crate::models::ChatMessage;
use crate::session::Session;
use crate::utils::{format_id_number, maybe_print_json, pretty_table};

const DEFAULT_FORECAST_DAYS: usize = 7;
const DEFAULT_HISTORY_LIMIT: usize = 50;

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("insights", sub)) => insights(api, session, sub)?,
        Some(("cashflow", sub)) => cashflow(api, session, sub)?,
        Some(("cost", sub)) => cost(api, session, sub)?,
        Some(("sales", sub)) => sales(api, session, sub)?,
        Some(("stock", sub)) => stock(api, session, sub)?,
        Some(("chat", sub)) => chat(api, session, sub)?,
        Some(("history", sub)) => history(api, session, sub)?,
        Some(("chats", sub)) => chats(api, session, sub)?,
        Some(("show", sub)) => show(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn insights(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let data = api.business_insights(business_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if !data.category_insights.is_empty() {
        let rows = data
            .category_insights
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.trend.clone(),
                    format!("{}%", c.percentage),
                    c.message.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Kategori", "Tren", "%", "Pesan"], rows));
    }
    if !data.product_insights.is_empty() {
        let rows = data
            .product_insights
            .iter()
            .map(|p| vec![p.product_name.clone(), p.contribution.clone(), p.message.clone()])
            .collect();
        println!("{}", pretty_table(&["Produk", "Kontribusi", "Pesan"], rows));
    }
    println!(
        "Margin {}% ({:+}%): {}",
        data.margin_insights.current_margin, data.margin_insights.change, data.margin_insights.message
    );
    println!("Generated at {}", data.generated_at);
    Ok(())
}

fn cashflow(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let days = sub
        .get_one::<usize>("days")
        .copied()
        .unwrap_or(DEFAULT_FORECAST_DAYS);
    let data = api.cashflow_forecast(business_id, days)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    println!(
        "Saldo saat ini Rp {} -> proyeksi Rp {}",
        format_id_number(&data.current_balance),
        format_id_number(&data.projected_end_balance)
    );
    let rows = data
        .forecast
        .iter()
        .map(|d| {
            vec![
                d.date.clone(),
                format_id_number(&d.projected_income),
                format_id_number(&d.projected_expense),
                format_id_number(&d.projected_balance),
                d.warning.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Tanggal", "Pemasukan", "Pengeluaran", "Saldo", "Peringatan"],
            rows
        )
    );
    if let Some(w) = &data.warnings {
        println!("Peringatan: {}", w);
    }
    println!("{}", data.summary);
    Ok(())
}

fn cost(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let data = api.cost_recommendations(business_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .recommendations
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                format!("Rp {}", format_id_number(&r.amount)),
                format!("{}%", r.percentage),
                r.priority.clone(),
                r.suggestion.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Kategori", "Jumlah", "%", "Prioritas", "Saran"], rows)
    );
    println!(
        "Total pengeluaran Rp {}",
        format_id_number(&data.total_expense)
    );
    if let Some(msg) = &data.message {
        println!("{}", msg);
    }
    Ok(())
}

fn sales(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let data = api.sales_recommendations(business_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .recommendations
        .iter()
        .map(|r| {
            vec![
                r.product_name.clone(),
                r.r#type.clone(),
                r.current_stock.map(|v| v.to_string()).unwrap_or_default(),
                r.priority.clone(),
                r.suggestion.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Produk", "Jenis", "Stok", "Prioritas", "Saran"], rows)
    );
    if let Some(msg) = &data.message {
        println!("{}", msg);
    }
    Ok(())
}

fn stock(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let data = api.stock_forecast(business_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .forecasts
        .iter()
        .map(|f| {
            vec![
                f.product_name.clone(),
                f.current_stock.to_string(),
                format!("{:.1}/hari", f.estimated_daily_sales),
                format!("{:.0} hari", f.days_until_empty),
                f.estimated_empty_date.clone(),
                f.recommended_restock_quantity.to_string(),
                f.priority.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Produk", "Stok", "Penjualan", "Habis Dalam", "Tanggal Habis", "Restock", "Prioritas"],
            rows
        )
    );
    if let Some(msg) = &data.message {
        println!("{}", msg);
    }
    Ok(())
}

fn print_transcript(messages: &[ChatMessage]) {
    for m in messages {
        println!("{}: {}", role_label(m.role), m.content);
    }
}

fn chat(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let mut chat = ChatSession::new();

    if let Some(id) = sub.get_one::<i64>("chat-id").copied() {
        chat.load_chat(id, api.chat_by_id(business_id, id)?);
    } else {
        // The initial history load is a convenience; starting with an empty
        // session is fine if it fails.
        match api.chat_history(business_id, DEFAULT_HISTORY_LIMIT) {
            Ok(history) => chat.load_history(history),
            Err(_) => println!("(could not load previous messages; starting fresh)"),
        }
    }
    print_transcript(chat.messages());
    println!("Type a message; '/new' starts a new session, '/quit' exits.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        match input {
            "/quit" | "/q" => break,
            "/new" => {
                chat.start_new();
                println!("(new session)");
            }
            _ => match chat.send(api, business_id, input) {
                Ok(Some(reply)) => println!("{}: {}", role_label(reply.role), reply.content),
                Ok(None) => {}
                Err(err) => eprintln!("Send failed: {}", err),
            },
        }
    }
    Ok(())
}

fn history(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = api.chat_history(business_id, limit)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &history.messages)? {
        return Ok(());
    }
    match history.chat {
        Some(chat) => {
            println!("Chat {} ({} messages)", chat.id, history.messages.len());
            print_transcript(&history.messages);
        }
        None => println!("No chat history yet."),
    }
    Ok(())
}

fn chats(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let chats = api.chats(business_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &chats)? {
        return Ok(());
    }
    let rows = chats
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.created_at.clone().unwrap_or_default(),
                c.updated_at.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Dibuat", "Diperbarui"], rows));
    Ok(())
}

fn show(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let business_id = session.require_business()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let history = api.chat_by_id(business_id, id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &history.messages)? {
        return Ok(());
    }
    print_transcript(&history.messages);
    Ok(())
}
