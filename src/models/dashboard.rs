// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::invoice::Invoice;

/// Cartões do painel principal. Agregados puros recalculados a cada leitura.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub total_profit: Decimal,
    pub total_invoices: usize,
    pub paid_invoices: usize,
    pub pending_invoices: usize,
    pub overdue_invoices: usize,
    pub total_products: usize,
    pub low_stock_products: usize,
    pub total_customers: usize,
}

/// Resumo da tela de estoque.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_products: usize,
    pub total_stock_units: u64,
    pub total_stock_value: Decimal,
    pub low_stock_count: usize,
}

// --- Relatórios ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReportSummary {
    pub total_invoices: usize,
    pub total_revenue: Decimal,
    pub total_tax: Decimal,
    pub paid_invoices: usize,
    pub pending_invoices: usize,
    pub overdue_invoices: usize,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub overdue_amount: Decimal,
}

/// Snapshot exportável: o recorte de faturas do período mais o seu resumo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReport {
    pub period: ReportPeriod,
    pub reference_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: InvoiceReportSummary,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReportSummary {
    pub total_expenses: Decimal,
    pub count: usize,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub period: ReportPeriod,
    pub reference_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: ExpenseReportSummary,
    pub expenses: Vec<Expense>,
}
