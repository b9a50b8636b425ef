// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::product::validate_amount;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    #[validate(length(min = 1, message = "O título da despesa é obrigatório"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(function = validate_amount, message = "O valor não pode ser negativo"))]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "A categoria é obrigatória"))]
    pub category: String,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = validate_amount, message = "O valor não pode ser negativo"))]
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub receipt_url: Option<String>,
}
