// src/store/invoice_store.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::store::json_store::JsonCollection;
use crate::store::seed;

/// Contador de numeração de faturas, persistido ao lado da coleção.
/// A sequência reinicia a cada dia; o número nunca se repete dentro do dia,
/// mesmo com faturas criadas em sucessão imediata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceCounter {
    day: NaiveDate,
    next: u32,
}

pub struct InvoiceStore {
    records: Vec<Invoice>,
    collection: JsonCollection,
    counter: Option<InvoiceCounter>,
    counter_file: JsonCollection,
}

impl InvoiceStore {
    pub fn open(collection: JsonCollection, counter_file: JsonCollection) -> Self {
        let records = collection.load_or_seed(seed::invoices);
        let counter = counter_file.try_load();
        Self {
            records,
            collection,
            counter,
            counter_file,
        }
    }

    fn persist(&self) {
        self.collection.save(&self.records);
    }

    // --- Numeração ---

    /// Próximo número no formato `INV-YYYYMMDD-NNN`, com sequência diária.
    /// O sufixo tem no mínimo três dígitos; a partir da milésima fatura do
    /// dia ele alarga (`-1000`, `-1001`, ...) em vez de reiniciar, porque a
    /// unicidade dentro do dia vale mais que a largura fixa.
    pub fn next_invoice_number(&mut self, date: NaiveDate) -> String {
        let counter = self
            .counter
            .get_or_insert(InvoiceCounter { day: date, next: 1 });
        if counter.day != date {
            *counter = InvoiceCounter { day: date, next: 1 };
        }

        let sequence = counter.next;
        counter.next += 1;
        self.counter_file.save(counter);

        format!("INV-{}-{:03}", date.format("%Y%m%d"), sequence)
    }

    // --- Escrita ---

    /// Anexa uma fatura já congelada pelo motor. A fatura é imutável daqui em
    /// diante, exceto pelo status.
    pub fn append(&mut self, invoice: Invoice) {
        self.records.push(invoice);
        self.persist();
    }

    /// Muda o status respeitando a máquina de estados; mudar para o próprio
    /// status é um no-op aceito.
    pub fn update_status(&mut self, id: Uuid, status: InvoiceStatus) -> Result<(), AppError> {
        let Some(invoice) = self.records.iter_mut().find(|i| i.id == id) else {
            return Ok(());
        };

        if invoice.status == status {
            return Ok(());
        }
        if !invoice.status.can_transition(status) {
            return Err(AppError::InvalidStatusTransition {
                from: invoice.status,
                to: status,
            });
        }

        invoice.status = status;
        invoice.updated_at = Utc::now();
        self.persist();
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) {
        self.records.retain(|i| i.id != id);
        self.persist();
    }

    // --- Consultas ---

    pub fn get(&self, id: Uuid) -> Option<&Invoice> {
        self.records.iter().find(|i| i.id == id)
    }

    pub fn all(&self) -> &[Invoice] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_customer(&self, customer_id: Uuid) -> Vec<&Invoice> {
        self.records
            .iter()
            .filter(|i| i.customer_id == customer_id)
            .collect()
    }

    pub fn by_status(&self, status: InvoiceStatus) -> Vec<&Invoice> {
        self.records
            .iter()
            .filter(|i| i.status == status)
            .collect()
    }

    pub fn in_period(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Invoice> {
        self.records
            .iter()
            .filter(|i| i.date >= from && i.date <= to)
            .collect()
    }

    // --- Agregados (redutores puros, recalculados a cada chamada) ---

    pub fn total_revenue(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |acc, i| acc + i.total)
    }

    pub fn paid_amount(&self) -> Decimal {
        self.amount_by_status(InvoiceStatus::Paid)
    }

    pub fn pending_amount(&self) -> Decimal {
        self.amount_by_status(InvoiceStatus::Sent)
    }

    pub fn overdue_amount(&self) -> Decimal {
        self.amount_by_status(InvoiceStatus::Overdue)
    }

    fn amount_by_status(&self, status: InvoiceStatus) -> Decimal {
        self.records
            .iter()
            .filter(|i| i.status == status)
            .fold(Decimal::ZERO, |acc, i| acc + i.total)
    }
}
