// src/services/dashboard_service.rs
//
// Agregados do painel principal. Leitura pura sobre os stores: nada é
// armazenado, cada chamada recalcula a partir das coleções vivas.

use chrono::NaiveDate;

use crate::models::dashboard::DashboardSummary;
use crate::models::invoice::InvoiceStatus;
use crate::store::customer_store::CustomerStore;
use crate::store::expense_store::ExpenseStore;
use crate::store::invoice_store::InvoiceStore;
use crate::store::product_store::{DEFAULT_LOW_STOCK_THRESHOLD, ProductStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Resumo dos cartões do painel. A data de referência entra como
    /// parâmetro para o cálculo de atraso ser determinístico nos testes.
    pub fn summary(
        &self,
        products: &ProductStore,
        customers: &CustomerStore,
        invoices: &InvoiceStore,
        expenses: &ExpenseStore,
        today: NaiveDate,
    ) -> DashboardSummary {
        let total_revenue = invoices.total_revenue();
        let total_expenses = expenses.total();

        // Atraso é derivado: status `sent` com vencimento no passado conta
        // como atrasada mesmo sem ninguém ter mudado o status.
        let overdue_invoices = invoices
            .all()
            .iter()
            .filter(|i| i.status == InvoiceStatus::Overdue || i.is_overdue(today))
            .count();
        let pending_invoices = invoices
            .all()
            .iter()
            .filter(|i| i.status == InvoiceStatus::Sent && !i.is_overdue(today))
            .count();

        DashboardSummary {
            total_revenue,
            total_expenses,
            total_profit: total_revenue - total_expenses,
            total_invoices: invoices.len(),
            paid_invoices: invoices.by_status(InvoiceStatus::Paid).len(),
            pending_invoices,
            overdue_invoices,
            total_products: products.len(),
            low_stock_products: products.low_stock(DEFAULT_LOW_STOCK_THRESHOLD).len(),
            total_customers: customers.len(),
        }
    }
}
