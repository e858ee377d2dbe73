// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use reqwest::blocking::multipart::Form;
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{
    AuthResponse, Business, BusinessInsights, BusinessOverview, CashflowForecast, Chat,
    ChatHistory, ChatInteraction, ChatRequest, CostRecommendations, CreateBusinessRequest,
    CreateTransactionRequest, Product, ProductList, RecordPurchaseRequest, RecordSaleRequest,
    SalesRecommendations, StockChangeRequest, StockForecasts, Transaction, TransactionList,
    TransactionStatus, TransactionTotals, TransactionType, UpdateTransactionRequest,
};
use crate::session::Session;
use crate::utils::http_client;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

// Endpoints reachable without a stored token.
const PUBLIC_PATHS: [&str; 3] = ["/auth/login", "/auth/register", "/auth/forgot-password"];

pub fn base_url_from_env() -> String {
    std::env::var("NUSABIZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required: no stored token (run 'nusabiz auth login')")]
    MissingToken,
    #[error("Session expired or not authorized")]
    SessionExpired,
    #[error("{0}")]
    Server(String),
    #[error("Response envelope missing data")]
    MissingData,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

/// Optional query filters for the transaction list endpoint.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilters {
    pub r#type: Option<TransactionType>,
    pub category: Option<String>,
    pub status: Option<TransactionStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TransactionFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(t) = self.r#type {
            let v = match t {
                TransactionType::Income => "Income",
                TransactionType::Expense => "Expense",
            };
            q.push(("type", v.to_string()));
        }
        if let Some(c) = &self.category {
            q.push(("category", c.clone()));
        }
        if let Some(s) = self.status {
            let v = match s {
                TransactionStatus::Pending => "pending",
                TransactionStatus::Complete => "complete",
                TransactionStatus::Cancel => "cancel",
            };
            q.push(("status", v.to_string()));
        }
        if let Some(d) = &self.start_date {
            q.push(("startDate", d.clone()));
        }
        if let Some(d) = &self.end_date {
            q.push(("endDate", d.clone()));
        }
        if let Some(n) = self.limit {
            q.push(("limit", n.to_string()));
        }
        if let Some(n) = self.offset {
            q.push(("offset", n.to_string()));
        }
        q
    }
}

/// Form fields for product create/update; sent as multipart because an
/// image file may ride along.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub current_stock: Option<i64>,
    pub purchase_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub image: Option<PathBuf>,
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: http_client()?,
            base_url,
            token,
        })
    }

    pub fn from_session(session: &Session) -> Result<Self> {
        Self::new(base_url_from_env(), session.token.clone())
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn is_public(path: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| path.starts_with(p))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        form: Option<Form>,
    ) -> Result<Option<Value>, ApiError> {
        if self.token.is_none() && !Self::is_public(path) {
            return Err(ApiError::MissingToken);
        }
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        if let Some(form) = form {
            req = req.multipart(form);
        }
        let resp = req.send()?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired);
        }
        let envelope: Envelope = match resp.json() {
            Ok(env) => env,
            // A non-JSON body on a failed status still has to surface a
            // message rather than a decode error.
            Err(_) if !status.is_success() => {
                return Err(ApiError::Server(format!("API error: {}", status)));
            }
            Err(err) => return Err(ApiError::Network(err)),
        };
        if !status.is_success() || !envelope.success {
            let message = envelope
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("API error: {}", status));
            return Err(ApiError::Server(message));
        }
        Ok(envelope.data)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let data = self
            .request(Method::GET, path, query, None, None)?
            .ok_or(ApiError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> Result<T, ApiError> {
        let data = self
            .request(method, path, &[], Some(body), None)?
            .ok_or(ApiError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let data = self
            .request(method, path, &[], None, Some(form))?
            .ok_or(ApiError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    // ---- auth ----

    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send_json(
            Method::POST,
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        )
    }

    pub fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send_json(
            Method::POST,
            "/auth/register",
            serde_json::json!({ "email": email, "password": password }),
        )
    }

    pub fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            "/auth/forgot-password",
            &[],
            Some(serde_json::json!({ "email": email })),
            None,
        )?;
        Ok(())
    }

    // ---- user & businesses ----

    pub fn me(&self) -> Result<crate::models::User, ApiError> {
        self.get("/users/me", &[])
    }

    pub fn businesses(&self) -> Result<Vec<Business>, ApiError> {
        self.get("/businesses", &[])
    }

    pub fn create_business(&self, req: &CreateBusinessRequest) -> Result<Business, ApiError> {
        self.send_json(Method::POST, "/businesses", serde_json::to_value(req)?)
    }

    pub fn business_overview(&self, business_id: i64) -> Result<BusinessOverview, ApiError> {
        self.get(&format!("/businesses/{}/overview", business_id), &[])
    }

    // ---- transactions ----

    pub fn transactions(
        &self,
        business_id: i64,
        filters: &TransactionFilters,
    ) -> Result<TransactionList, ApiError> {
        self.get(
            &format!("/businesses/{}/transactions", business_id),
            &filters.to_query(),
        )
    }

    pub fn create_transaction(
        &self,
        business_id: i64,
        req: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/businesses/{}/transactions", business_id),
            serde_json::to_value(req)?,
        )
    }

    pub fn update_transaction(
        &self,
        business_id: i64,
        transaction_id: i64,
        req: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/businesses/{}/transactions/{}", business_id, transaction_id),
            serde_json::to_value(req)?,
        )
    }

    pub fn cancel_transaction(
        &self,
        business_id: i64,
        transaction_id: i64,
    ) -> Result<Transaction, ApiError> {
        let data = self
            .request(
                Method::PUT,
                &format!(
                    "/businesses/{}/transactions/{}/cancel",
                    business_id, transaction_id
                ),
                &[],
                None,
                None,
            )?
            .ok_or(ApiError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    pub fn delete_transaction(&self, business_id: i64, transaction_id: i64) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("/businesses/{}/transactions/{}", business_id, transaction_id),
            &[],
            None,
            None,
        )?;
        Ok(())
    }

    pub fn record_sale(
        &self,
        business_id: i64,
        req: &RecordSaleRequest,
    ) -> Result<Transaction, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/businesses/{}/transactions/sales", business_id),
            serde_json::to_value(req)?,
        )
    }

    pub fn record_purchase(
        &self,
        business_id: i64,
        req: &RecordPurchaseRequest,
    ) -> Result<Transaction, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/businesses/{}/transactions/purchases", business_id),
            serde_json::to_value(req)?,
        )
    }

    pub fn transaction_totals(
        &self,
        business_id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<TransactionTotals, ApiError> {
        let mut q = Vec::new();
        if let Some(d) = start_date {
            q.push(("startDate", d.to_string()));
        }
        if let Some(d) = end_date {
            q.push(("endDate", d.to_string()));
        }
        self.get(
            &format!("/businesses/{}/transactions/totals", business_id),
            &q,
        )
    }

    // ---- products ----

    pub fn products(&self, business_id: i64, search: Option<&str>) -> Result<ProductList, ApiError> {
        let mut q = Vec::new();
        if let Some(s) = search {
            q.push(("search", s.to_string()));
        }
        self.get(&format!("/businesses/{}/products", business_id), &q)
    }

    pub fn create_product(&self, business_id: i64, form: &ProductForm) -> Result<Product, ApiError> {
        self.send_form(
            Method::POST,
            &format!("/businesses/{}/products", business_id),
            Self::product_form(form)?,
        )
    }

    pub fn update_product(
        &self,
        business_id: i64,
        product_id: i64,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        self.send_form(
            Method::PUT,
            &format!("/businesses/{}/products/{}", business_id, product_id),
            Self::product_form(form)?,
        )
    }

    pub fn delete_product(&self, business_id: i64, product_id: i64) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("/businesses/{}/products/{}", business_id, product_id),
            &[],
            None,
            None,
        )?;
        Ok(())
    }

    /// PATCH the stock counter by a relative delta. The response body is
    /// ignored; the caller tracks the confirmed value itself.
    pub fn adjust_stock(
        &self,
        business_id: i64,
        product_id: i64,
        delta: i64,
    ) -> Result<(), ApiError> {
        let req = StockChangeRequest {
            quantity_change: delta,
        };
        self.request(
            Method::PATCH,
            &format!("/businesses/{}/products/{}/stock", business_id, product_id),
            &[],
            Some(serde_json::to_value(&req)?),
            None,
        )?;
        Ok(())
    }

    fn product_form(form: &ProductForm) -> Result<Form, ApiError> {
        let mut f = Form::new();
        if let Some(name) = &form.name {
            f = f.text("name", name.clone());
        }
        if let Some(stock) = form.current_stock {
            f = f.text("current_stock", stock.to_string());
        }
        if let Some(price) = form.purchase_price {
            f = f.text("purchase_price", price.to_string());
        }
        if let Some(price) = form.selling_price {
            f = f.text("selling_price", price.to_string());
        }
        if let Some(image) = &form.image {
            f = f.file("image", image)?;
        }
        Ok(f)
    }

    // ---- AI ----

    pub fn business_insights(&self, business_id: i64) -> Result<BusinessInsights, ApiError> {
        self.get(&format!("/businesses/{}/ai/insights", business_id), &[])
    }

    pub fn cashflow_forecast(
        &self,
        business_id: i64,
        days: usize,
    ) -> Result<CashflowForecast, ApiError> {
        self.get(
            &format!("/businesses/{}/ai/cashflow-forecast", business_id),
            &[("days", days.to_string())],
        )
    }

    pub fn cost_recommendations(&self, business_id: i64) -> Result<CostRecommendations, ApiError> {
        self.get(
            &format!("/businesses/{}/ai/cost-recommendations", business_id),
            &[],
        )
    }

    pub fn sales_recommendations(
        &self,
        business_id: i64,
    ) -> Result<SalesRecommendations, ApiError> {
        self.get(
            &format!("/businesses/{}/ai/sales-recommendations", business_id),
            &[],
        )
    }

    pub fn stock_forecast(&self, business_id: i64) -> Result<StockForecasts, ApiError> {
        self.get(&format!("/businesses/{}/ai/stock-forecast", business_id), &[])
    }

    pub fn send_chat(&self, business_id: i64, req: &ChatRequest) -> Result<ChatInteraction, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/businesses/{}/ai/chat", business_id),
            serde_json::to_value(req)?,
        )
    }

    pub fn chat_history(&self, business_id: i64, limit: usize) -> Result<ChatHistory, ApiError> {
        self.get(
            &format!("/businesses/{}/ai/chat/history", business_id),
            &[("limit", limit.to_string())],
        )
    }

    pub fn chats(&self, business_id: i64) -> Result<Vec<Chat>, ApiError> {
        self.get(&format!("/businesses/{}/ai/chats", business_id), &[])
    }

    pub fn chat_by_id(&self, business_id: i64, chat_id: i64) -> Result<ChatHistory, ApiError> {
        self.get(
            &format!("/businesses/{}/ai/chats/{}", business_id, chat_id),
            &[],
        )
    }
}
