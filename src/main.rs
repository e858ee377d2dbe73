// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use nusabiz::api::{ApiClient, ApiError};
use nusabiz::{cli, commands, session};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let session = session::Session::load()?;
    let api = ApiClient::from_session(&session)?;

    let result = match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&api, &session, sub),
        Some(("business", sub)) => commands::business::handle(&api, &session, sub),
        Some(("tx", sub)) => commands::transactions::handle(&api, &session, sub),
        Some(("product", sub)) => commands::products::handle(&api, &session, sub),
        Some(("dashboard", sub)) => commands::dashboard::handle(&api, &session, sub),
        Some(("ai", sub)) => commands::ai::handle(&api, &session, sub),
        Some(("export", sub)) => commands::exporter::handle(&api, &session, sub),
        Some(("doctor", _)) => commands::doctor::handle(&api, &session),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(err) = result {
        let expired = err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::SessionExpired)));
        // Clear the stored credentials at most once, and only when some
        // were present; a fresh process starts logged out either way.
        if expired && session.is_authenticated() {
            session::clear()?;
            eprintln!("Session expired; stored credentials cleared. Run 'nusabiz auth login'.");
        }
        return Err(err);
    }
    Ok(())
}
