// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::{base_url_from_env, ApiClient, ApiError};
use crate::session::Session;
use crate::utils::pretty_table;

pub fn handle(api: &ApiClient, session: &Session) -> Result<()> {
    let mut rows = Vec::new();

    if !session.is_authenticated() {
        rows.push(vec![
            "no_session".into(),
            "not logged in; run 'nusabiz auth login'".into(),
        ]);
    }
    if session.business_id.is_none() {
        rows.push(vec![
            "no_active_business".into(),
            "run 'nusabiz business add' or 'nusabiz business select'".into(),
        ]);
    }

    if session.is_authenticated() {
        match api.me() {
            Ok(user) => {
                println!("Logged in as {} ({})", user.email, base_url_from_env());
            }
            Err(ApiError::SessionExpired) => {
                rows.push(vec![
                    "session_expired".into(),
                    "token rejected; log in again".into(),
                ]);
            }
            Err(err) => {
                rows.push(vec!["api_unreachable".into(), err.to_string()]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
