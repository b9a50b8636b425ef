// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::product::Product;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Máquina de estados do ciclo de vida da fatura.
    /// `paid` e `cancelled` são terminais; `overdue` também pode ser derivado
    /// pela data de vencimento sem transição gravada (ver [`Invoice::is_overdue`]).
    pub fn can_transition(self, to: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, to),
            (Draft, Sent)
                | (Draft, Cancelled)
                | (Sent, Paid)
                | (Sent, Overdue)
                | (Sent, Cancelled)
                | (Overdue, Paid)
                | (Overdue, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

// --- Structs ---

/// Um item de linha dentro da fatura. `product_name` e `unit_price` são
/// snapshots copiados no momento da confirmação: mudanças posteriores no
/// produto não afetam faturas já emitidas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Fatura confirmada. Os campos monetários são congelados na criação;
/// mudanças posteriores na alíquota global não os recalculam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// `overdue` derivado: fatura enviada cujo vencimento já passou.
    /// Não altera o status gravado.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent
            && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

/// Totais de uma fatura (ou de uma pré-visualização de carrinho).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

// --- Carrinho (entrada do motor de faturas) ---

/// Uma linha pedida no formulário. `product_id` fica vazio enquanto o usuário
/// não escolhe o produto; linhas sem produto ou sem quantidade são ignoradas.
/// O preço unitário é o que o chamador informou: por padrão o preço atual do
/// produto, mas o usuário pode sobrescrevê-lo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub product_id: Option<Uuid>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineRequest {
    /// Linha pré-preenchida com o preço atual do produto.
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: Some(product.id),
            quantity,
            unit_price: product.price,
        }
    }

    /// Linha com produto resolvido e quantidade positiva.
    pub fn is_valid(&self) -> bool {
        self.product_id.is_some() && self.quantity > 0
    }
}

/// Carrinho completo enviado pelo formulário de fatura.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_id: Option<Uuid>,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
    pub items: Vec<LineRequest>,
}

impl InvoiceDraft {
    pub fn new(customer_id: Uuid, date: NaiveDate) -> Self {
        Self {
            customer_id: Some(customer_id),
            date,
            due_date: None,
            discount_amount: Decimal::ZERO,
            notes: None,
            items: Vec::new(),
        }
    }

    pub fn valid_items(&self) -> impl Iterator<Item = &LineRequest> {
        self.items.iter().filter(|item| item.is_valid())
    }
}
