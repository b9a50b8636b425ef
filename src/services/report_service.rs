// src/services/report_service.rs
//
// Relatórios de faturas e despesas por período (diário, semanal, mensal),
// com exportação em JSON ou texto plano para qualquer `io::Write`. O destino
// (download, arquivo, stdout) é problema do chamador.

use std::io::Write;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::common::error::AppError;
use crate::models::dashboard::{
    CategoryTotal, ExpenseReport, ExpenseReportSummary, InvoiceReport, InvoiceReportSummary,
    ReportPeriod,
};
use crate::models::invoice::InvoiceStatus;
use crate::store::expense_store::ExpenseStore;
use crate::store::invoice_store::InvoiceStore;
use crate::store::settings_store::SettingsStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Janela civil do período em torno da data de referência. A semana
    /// começa no domingo.
    fn period_bounds(period: ReportPeriod, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match period {
            ReportPeriod::Daily => (reference, reference),
            ReportPeriod::Weekly => {
                let start = reference
                    - chrono::Days::new(u64::from(reference.weekday().num_days_from_sunday()));
                (start, start + chrono::Days::new(6))
            }
            ReportPeriod::Monthly => {
                let start = reference.with_day(1).unwrap_or(reference);
                let end = start
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|d| d.checked_sub_days(chrono::Days::new(1)))
                    .unwrap_or(reference);
                (start, end)
            }
        }
    }

    pub fn invoice_report(
        &self,
        invoices: &InvoiceStore,
        period: ReportPeriod,
        reference: NaiveDate,
    ) -> InvoiceReport {
        let (from, to) = Self::period_bounds(period, reference);
        let selected = invoices.in_period(from, to);

        let mut summary = InvoiceReportSummary {
            total_invoices: selected.len(),
            total_revenue: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            paid_invoices: 0,
            pending_invoices: 0,
            overdue_invoices: 0,
            paid_amount: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
            overdue_amount: Decimal::ZERO,
        };

        for invoice in &selected {
            summary.total_revenue += invoice.total;
            summary.total_tax += invoice.tax_amount;
            match invoice.status {
                InvoiceStatus::Paid => {
                    summary.paid_invoices += 1;
                    summary.paid_amount += invoice.total;
                }
                InvoiceStatus::Sent => {
                    summary.pending_invoices += 1;
                    summary.pending_amount += invoice.total;
                }
                InvoiceStatus::Overdue => {
                    summary.overdue_invoices += 1;
                    summary.overdue_amount += invoice.total;
                }
                InvoiceStatus::Draft | InvoiceStatus::Cancelled => {}
            }
        }

        InvoiceReport {
            period,
            reference_date: reference,
            generated_at: Utc::now(),
            summary,
            invoices: selected.into_iter().cloned().collect(),
        }
    }

    pub fn expense_report(
        &self,
        expenses: &ExpenseStore,
        period: ReportPeriod,
        reference: NaiveDate,
    ) -> ExpenseReport {
        let (from, to) = Self::period_bounds(period, reference);
        let selected = expenses.in_period(from, to);

        let mut by_category: Vec<CategoryTotal> = Vec::new();
        let mut total = Decimal::ZERO;
        for expense in &selected {
            total += expense.amount;
            match by_category.iter_mut().find(|c| c.category == expense.category) {
                Some(entry) => {
                    entry.amount += expense.amount;
                    entry.count += 1;
                }
                None => by_category.push(CategoryTotal {
                    category: expense.category.clone(),
                    amount: expense.amount,
                    count: 1,
                }),
            }
        }

        ExpenseReport {
            period,
            reference_date: reference,
            generated_at: Utc::now(),
            summary: ExpenseReportSummary {
                total_expenses: total,
                count: selected.len(),
                by_category,
            },
            expenses: selected.into_iter().cloned().collect(),
        }
    }

    // --- Exportação ---

    pub fn export_json<T: serde::Serialize, W: Write>(
        &self,
        report: &T,
        writer: W,
    ) -> Result<(), AppError> {
        serde_json::to_writer_pretty(writer, report)?;
        Ok(())
    }

    /// Snapshot legível do relatório de faturas, com os valores formatados na
    /// moeda configurada.
    pub fn export_invoice_text<W: Write>(
        &self,
        report: &InvoiceReport,
        settings: &SettingsStore,
        mut writer: W,
    ) -> Result<(), AppError> {
        let label = match report.period {
            ReportPeriod::Daily => "diário",
            ReportPeriod::Weekly => "semanal",
            ReportPeriod::Monthly => "mensal",
        };
        writeln!(writer, "Relatório de faturas ({label})")?;
        writeln!(writer, "Referência: {}", settings.format_date(report.reference_date))?;
        writeln!(writer, "Faturas: {}", report.summary.total_invoices)?;
        writeln!(
            writer,
            "Receita: {}",
            settings.format_currency(report.summary.total_revenue)
        )?;
        writeln!(
            writer,
            "Impostos: {}",
            settings.format_currency(report.summary.total_tax)
        )?;
        writeln!(
            writer,
            "Pagas: {} ({})",
            report.summary.paid_invoices,
            settings.format_currency(report.summary.paid_amount)
        )?;
        writeln!(
            writer,
            "Pendentes: {} ({})",
            report.summary.pending_invoices,
            settings.format_currency(report.summary.pending_amount)
        )?;
        writeln!(
            writer,
            "Atrasadas: {} ({})",
            report.summary.overdue_invoices,
            settings.format_currency(report.summary.overdue_amount)
        )?;
        writeln!(writer)?;
        for invoice in &report.invoices {
            writeln!(
                writer,
                "{}  {}  {}  [{:?}]",
                invoice.invoice_number,
                invoice.customer_name,
                settings.format_currency(invoice.total),
                invoice.status
            )?;
        }
        Ok(())
    }

    pub fn export_expense_text<W: Write>(
        &self,
        report: &ExpenseReport,
        settings: &SettingsStore,
        mut writer: W,
    ) -> Result<(), AppError> {
        let label = match report.period {
            ReportPeriod::Daily => "diário",
            ReportPeriod::Weekly => "semanal",
            ReportPeriod::Monthly => "mensal",
        };
        writeln!(writer, "Relatório de despesas ({label})")?;
        writeln!(writer, "Referência: {}", settings.format_date(report.reference_date))?;
        writeln!(
            writer,
            "Total: {} em {} lançamentos",
            settings.format_currency(report.summary.total_expenses),
            report.summary.count
        )?;
        writeln!(writer)?;
        for category in &report.summary.by_category {
            writeln!(
                writer,
                "{}: {} ({} lançamentos)",
                category.category,
                settings.format_currency(category.amount),
                category.count
            )?;
        }
        Ok(())
    }
}
