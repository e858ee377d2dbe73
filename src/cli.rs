// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn auth_cmd() -> Command {
    Command::new("auth")
        .about("Login, registration, and session management")
        .subcommand(
            Command::new("login")
                .about("Log in and store the session token")
                .arg(Arg::new("email").long("email").short('e').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Register a new account")
                .arg(Arg::new("email").long("email").short('e').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true))
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password recovery email")
                .arg(Arg::new("email").long("email").short('e').required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the stored session"))
}

fn business_cmd() -> Command {
    Command::new("business")
        .about("Businesses owned by the logged-in user")
        .subcommand(
            Command::new("add")
                .about("Create a business and make it active")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("location").long("location"))
                .arg(Arg::new("balance").long("balance").help("Opening balance")),
        )
        .subcommand(json_flags(Command::new("list").about("List businesses")))
        .subcommand(
            Command::new("select")
                .about("Set the active business")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(json_flags(
            Command::new("overview").about("Statistics for the active business"),
        ))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Transactions of the active business")
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("type").long("type").help("Income|Expense"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("status").long("status").help("pending|complete|cancel"))
                .arg(Arg::new("start").long("start").help("YYYY-MM-DD"))
                .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .short('q')
                        .help("Client-side text search"),
                ),
        ))
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("type").long("type").required(true).help("Income|Expense"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("status").long("status").help("pending|complete|cancel")),
        )
        .subcommand(
            Command::new("update")
                .about("Update a transaction (its type cannot change)")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("status").long("status")),
        )
        .subcommand(
            Command::new("cancel")
                .about("Cancel a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction (soft delete server-side)")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(json_flags(
            Command::new("totals")
                .about("Income/expense/net totals")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("start").long("start").help("YYYY-MM-DD"))
                .arg(Arg::new("end").long("end").help("YYYY-MM-DD")),
        ))
        .subcommand(
            Command::new("sale")
                .about("Record a product sale")
                .arg(
                    Arg::new("item")
                        .long("item")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("PRODUCT_ID:QTY:PRICE, repeatable"),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("purchase")
                .about("Record a stock purchase")
                .arg(
                    Arg::new("item")
                        .long("item")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("PRODUCT_ID:QTY:PRICE, repeatable"),
                )
                .arg(Arg::new("description").long("description")),
        )
}

fn product_cmd() -> Command {
    Command::new("product")
        .about("Products of the active business")
        .subcommand(json_flags(
            Command::new("list")
                .about("List products")
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .help("stok-tertinggi|stok-terendah|harga-tertinggi|harga-terendah"),
                )
                .arg(Arg::new("search").long("search")),
        ))
        .subcommand(
            Command::new("add")
                .about("Add a product")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("stock")
                        .long("stock")
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("purchase-price").long("purchase-price"))
                .arg(Arg::new("selling-price").long("selling-price"))
                .arg(Arg::new("image").long("image").help("Path to an image file")),
        )
        .subcommand(
            Command::new("update")
                .about("Update a product")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("stock")
                        .long("stock")
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("purchase-price").long("purchase-price"))
                .arg(Arg::new("selling-price").long("selling-price"))
                .arg(Arg::new("image").long("image").help("Path to an image file")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a product")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("stock")
                .about("Adjust the stock counter (interactive unless --set/--delta)")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .value_parser(value_parser!(i64))
                        .conflicts_with("delta")
                        .help("Set the counter to a value"),
                )
                .arg(
                    Arg::new("delta")
                        .long("delta")
                        .value_parser(value_parser!(i64))
                        .allow_hyphen_values(true)
                        .help("Shift the counter by a signed amount"),
                ),
        )
}

fn ai_cmd() -> Command {
    Command::new("ai")
        .about("AI assistant: insights, forecasts, and chat")
        .subcommand(json_flags(Command::new("insights").about("Business insights")))
        .subcommand(json_flags(
            Command::new("cashflow").about("Cashflow forecast").arg(
                Arg::new("days")
                    .long("days")
                    .value_parser(value_parser!(usize))
                    .help("Days to forecast (default 7)"),
            ),
        ))
        .subcommand(json_flags(Command::new("cost").about("Cost-saving recommendations")))
        .subcommand(json_flags(Command::new("sales").about("Sales recommendations")))
        .subcommand(json_flags(Command::new("stock").about("Stock forecast")))
        .subcommand(
            Command::new("chat")
                .about("Interactive chat session")
                .arg(
                    Arg::new("chat-id")
                        .long("chat-id")
                        .value_parser(value_parser!(i64))
                        .help("Resume an existing session"),
                ),
        )
        .subcommand(json_flags(
            Command::new("history").about("Latest chat session transcript").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(Command::new("chats").about("List chat sessions")))
        .subcommand(json_flags(
            Command::new("show")
                .about("Show one chat session")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        ))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data to files").subcommand(
        Command::new("transactions")
            .about("Export the transaction list")
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("xlsx")
                    .help("xlsx|csv"),
            )
            .arg(Arg::new("out").long("out").help("Output path (default Transaksi_<date>)"))
            .arg(Arg::new("month").long("month").help("YYYY-MM")),
    )
}

pub fn build_cli() -> Command {
    Command::new("nusabiz")
        .about("NusaBiz business management client")
        .version(clap::crate_version!())
        .subcommand(auth_cmd())
        .subcommand(business_cmd())
        .subcommand(tx_cmd())
        .subcommand(product_cmd())
        .subcommand(
            json_flags(Command::new("dashboard").about("Balance and omzet summary")).arg(
                Arg::new("year")
                    .long("year")
                    .value_parser(value_parser!(i32))
                    .help("Year for the monthly breakdown (default: current)"),
            ),
        )
        .subcommand(ai_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check session and API health"))
}
