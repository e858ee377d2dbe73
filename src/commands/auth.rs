// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::{base_url_from_env, ApiClient};
use crate::session::{self, Session};
use crate::utils::is_valid_email;

pub fn handle(api: &ApiClient, _session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(api, sub)?,
        Some(("register", sub)) => register(api, sub)?,
        Some(("forgot-password", sub)) => forgot_password(api, sub)?,
        Some(("logout", _)) => {
            session::clear()?;
            println!("Logged out; stored session cleared.");
        }
        _ => {}
    }
    Ok(())
}

fn login(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim();
    let password = sub.get_one::<String>("password").unwrap();
    if !is_valid_email(email) {
        anyhow::bail!("'{}' is not a valid email address", email);
    }

    let auth = api.login(email, password)?;
    let authed = ApiClient::new(base_url_from_env(), Some(auth.token.clone()))?;

    // Auto-select the first business, like the web client does after login.
    let businesses = authed.businesses().unwrap_or_default();
    let business_id = businesses.first().map(|b| b.id);
    // The cached user blob is a convenience; failing to fetch it is not
    // a login failure.
    let user = authed.me().ok();

    let session = Session {
        token: Some(auth.token),
        business_id,
        user,
    };
    session.save()?;

    match businesses.first() {
        Some(b) => println!("Logged in as {}; active business '{}'", email, b.business_name),
        None => println!(
            "Logged in as {}. No business yet; run 'nusabiz business add'",
            email
        ),
    }
    Ok(())
}

fn register(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim();
    let password = sub.get_one::<String>("password").unwrap();
    let confirm = sub.get_one::<String>("confirm-password").unwrap();

    // Validation failures never reach the network.
    if !is_valid_email(email) {
        anyhow::bail!("'{}' is not a valid email address", email);
    }
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    if password != confirm {
        anyhow::bail!("Password and confirmation do not match");
    }

    let auth = api.register(email, password)?;
    let session = Session {
        token: Some(auth.token),
        business_id: None,
        user: None,
    };
    session.save()?;
    println!(
        "Registered {}. Next: 'nusabiz business add --name <name>'",
        email
    );
    Ok(())
}

fn forgot_password(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().trim();
    if !is_valid_email(email) {
        anyhow::bail!("'{}' is not a valid email address", email);
    }
    // Deliberately the same message on success and failure so the command
    // cannot be used to probe which emails exist.
    let _ = api.forgot_password(email);
    println!("If your email is registered, a recovery link has been sent to your inbox.");
    Ok(())
}
