// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Complete,
    Cancel,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Complete => "Sukses",
            TransactionStatus::Cancel => "Dibatalkan",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub business_id: i64,
    pub transaction_date: DateTime<FixedOffset>,
    pub r#type: TransactionType,
    pub category: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTransactionRequest {
    pub r#type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}

/// The update payload carries no `type` field on purpose: the backend's
/// reversal math assumes the type recorded at creation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleItem {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i64,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseItem {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i64,
    #[serde(rename = "purchasePrice")]
    pub purchase_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordSaleRequest {
    pub products: Vec<SaleItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordPurchaseRequest {
    pub products: Vec<PurchaseItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockChangeRequest {
    #[serde(rename = "quantityChange")]
    pub quantity_change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Active,
    Inactive,
    Low,
    Out,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Active => "Tersedia",
            StockStatus::Inactive => "Nonaktif",
            StockStatus::Low => "Stok Rendah",
            StockStatus::Out => "Habis",
        }
    }
}

pub const DEFAULT_BASE_STOCK: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    #[serde(default)]
    pub base_stock: Option<i64>,
    pub current_stock: i64,
    pub purchase_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Product {
    /// Capacity ceiling for the stock counter.
    pub fn capacity(&self) -> i64 {
        self.base_stock.unwrap_or(DEFAULT_BASE_STOCK)
    }

    /// Status derived from the counter alone, regardless of what the
    /// server last reported.
    pub fn derived_status(&self) -> StockStatus {
        if self.current_stock == 0 {
            StockStatus::Out
        } else if self.current_stock < 10 {
            StockStatus::Low
        } else {
            StockStatus::Active
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub user_id: String,
    pub business_name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub current_balance: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBusinessRequest {
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessOverview {
    pub business: Business,
    #[serde(rename = "totalProducts")]
    pub total_products: i64,
    #[serde(rename = "totalTransactions")]
    pub total_transactions: i64,
    #[serde(rename = "totalIncome")]
    pub total_income: Decimal,
    #[serde(rename = "totalExpense")]
    pub total_expense: Decimal,
    #[serde(rename = "lowStockProducts")]
    pub low_stock_products: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "User")]
    User,
    #[serde(alias = "Bot")]
    Bot,
}

// The backend names this field `sender`; the alias accepts both spellings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(default)]
    pub chat_id: i64,
    #[serde(alias = "sender")]
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatInteraction {
    pub chat: Chat,
    #[serde(rename = "userMessage")]
    pub user_message: ChatMessage,
    #[serde(rename = "botResponse")]
    pub bot_response: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// AI payloads are rendered as-is; the recommendation logic behind them is
// opaque to this client.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInsight {
    pub category: String,
    pub trend: String,
    pub percentage: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInsight {
    #[serde(rename = "productName")]
    pub product_name: String,
    pub contribution: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginInsight {
    #[serde(rename = "currentMargin")]
    pub current_margin: f64,
    pub change: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInsights {
    #[serde(rename = "categoryInsights", default)]
    pub category_insights: Vec<CategoryInsight>,
    #[serde(rename = "productInsights", default)]
    pub product_insights: Vec<ProductInsight>,
    #[serde(rename = "marginInsights")]
    pub margin_insights: MarginInsight,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowForecastDay {
    pub date: String,
    #[serde(rename = "projectedIncome")]
    pub projected_income: Decimal,
    #[serde(rename = "projectedExpense")]
    pub projected_expense: Decimal,
    #[serde(rename = "projectedBalance")]
    pub projected_balance: Decimal,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowForecast {
    #[serde(rename = "currentBalance")]
    pub current_balance: Decimal,
    #[serde(rename = "projectedEndBalance")]
    pub projected_end_balance: Decimal,
    #[serde(default)]
    pub forecast: Vec<CashflowForecastDay>,
    pub warnings: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecommendation {
    pub category: String,
    pub amount: Decimal,
    pub percentage: f64,
    pub suggestion: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecommendations {
    #[serde(default)]
    pub recommendations: Vec<CostRecommendation>,
    #[serde(rename = "totalExpense")]
    pub total_expense: Decimal,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecommendation {
    pub r#type: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "currentStock", default)]
    pub current_stock: Option<i64>,
    #[serde(default)]
    pub margin: Option<f64>,
    pub suggestion: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecommendations {
    #[serde(default)]
    pub recommendations: Vec<SalesRecommendation>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockForecast {
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "currentStock")]
    pub current_stock: i64,
    #[serde(rename = "estimatedDailySales")]
    pub estimated_daily_sales: f64,
    #[serde(rename = "daysUntilEmpty")]
    pub days_until_empty: f64,
    #[serde(rename = "estimatedEmptyDate")]
    pub estimated_empty_date: String,
    #[serde(rename = "recommendedRestockQuantity")]
    pub recommended_restock_quantity: i64,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockForecasts {
    #[serde(default)]
    pub forecasts: Vec<StockForecast>,
    #[serde(default)]
    pub message: Option<String>,
}
