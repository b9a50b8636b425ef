// src/services/invoice_engine.rs
//
// O motor de faturas: transforma um carrinho de linhas pedidas em uma fatura
// confirmada e internamente consistente, protegendo o estoque contra venda a
// descoberto. Os stores entram como empréstimos por chamada e a alíquota como
// parâmetro explícito — o motor é uma função pura das suas entradas, sem
// estado ambiente.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::invoice::{
    Invoice, InvoiceDraft, InvoiceItem, InvoiceStatus, InvoiceTotals,
};
use crate::store::customer_store::CustomerStore;
use crate::store::invoice_store::InvoiceStore;
use crate::store::product_store::ProductStore;

/// Diagnóstico de disponibilidade de uma linha, para a interface mostrar
/// todos os problemas de uma vez. Não substitui a validação: a confirmação
/// continua abortando no primeiro erro.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAvailability {
    pub product_id: Uuid,
    pub product_name: String,
    pub requested: u32,
    pub available: u32,
    pub sufficient: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceEngine;

impl InvoiceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Valida o carrinho sem tocar em nada. A primeira falha aborta: não
    /// existe fatura parcial.
    pub fn validate(
        &self,
        customers: &CustomerStore,
        products: &ProductStore,
        draft: &InvoiceDraft,
    ) -> Result<(), AppError> {
        let customer_id = draft.customer_id.ok_or(AppError::MissingCustomer)?;
        if customers.get(customer_id).is_none() {
            return Err(AppError::MissingCustomer);
        }

        if draft.valid_items().next().is_none() {
            return Err(AppError::EmptyCart);
        }

        // Desconto negativo inflaria o total por fora da alíquota.
        if draft.discount_amount < Decimal::ZERO {
            return Err(AppError::NegativeDiscount);
        }

        // Linhas repetidas do mesmo produto contam somadas: cada uma pode
        // caber sozinha no saldo e ainda assim o conjunto estourar.
        let mut cumulative: Vec<(Uuid, u32)> = Vec::new();
        for line in draft.valid_items() {
            let Some(product_id) = line.product_id else {
                continue;
            };
            let product = products
                .get(product_id)
                .ok_or(AppError::ProductNotFound(product_id))?;

            let requested = match cumulative.iter_mut().find(|(id, _)| *id == product_id) {
                Some((_, total)) => {
                    *total += line.quantity;
                    *total
                }
                None => {
                    cumulative.push((product_id, line.quantity));
                    line.quantity
                }
            };

            if requested > product.quantity {
                return Err(AppError::InsufficientStock {
                    name: product.name.clone(),
                    requested,
                    available: product.quantity,
                });
            }
        }

        Ok(())
    }

    /// Relatório de disponibilidade linha a linha, sem abortar no primeiro
    /// problema. Linhas sem produto resolvido são omitidas.
    pub fn availability_report(
        &self,
        products: &ProductStore,
        draft: &InvoiceDraft,
    ) -> Vec<LineAvailability> {
        draft
            .valid_items()
            .filter_map(|line| {
                let product_id = line.product_id?;
                Some(match products.get(product_id) {
                    Some(product) => LineAvailability {
                        product_id,
                        product_name: product.name.clone(),
                        requested: line.quantity,
                        available: product.quantity,
                        sufficient: line.quantity <= product.quantity,
                    },
                    None => LineAvailability {
                        product_id,
                        product_name: String::new(),
                        requested: line.quantity,
                        available: 0,
                        sufficient: false,
                    },
                })
            })
            .collect()
    }

    /// Totais do carrinho: subtotal é a soma dos totais de linha, o imposto é
    /// percentual sobre o subtotal e o total nunca fica negativo, mesmo com
    /// desconto maior que subtotal + imposto.
    pub fn compute_totals(
        &self,
        items: &[InvoiceItem],
        tax_rate: Decimal,
        discount_amount: Decimal,
    ) -> InvoiceTotals {
        let subtotal = items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.total);
        let tax_amount = subtotal * tax_rate / Decimal::from(100);
        let total = (subtotal + tax_amount - discount_amount).max(Decimal::ZERO);

        InvoiceTotals {
            subtotal,
            tax_amount,
            discount_amount,
            total,
        }
    }

    /// Confirma a fatura: valida, congela os snapshots (nome do cliente, nome
    /// e preço dos produtos), baixa o estoque de todas as linhas como um lote
    /// atômico e só então anexa a fatura com status `draft`.
    pub fn commit(
        &self,
        products: &mut ProductStore,
        invoices: &mut InvoiceStore,
        customers: &CustomerStore,
        draft: InvoiceDraft,
        tax_rate: Decimal,
    ) -> Result<Invoice, AppError> {
        self.validate(customers, products, &draft)?;

        let customer_id = draft.customer_id.ok_or(AppError::MissingCustomer)?;
        let customer_name = customers
            .get(customer_id)
            .map(|c| c.name.clone())
            .ok_or(AppError::MissingCustomer)?;

        // Snapshots de linha: valores copiados agora, imunes a mudanças
        // futuras no catálogo.
        let mut items = Vec::new();
        for line in draft.valid_items() {
            let Some(product_id) = line.product_id else {
                continue;
            };
            let product = products
                .get(product_id)
                .ok_or(AppError::ProductNotFound(product_id))?;

            items.push(InvoiceItem {
                product_id,
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                total: Decimal::from(line.quantity) * line.unit_price,
            });
        }

        let totals = self.compute_totals(&items, tax_rate, draft.discount_amount);

        // Baixa de estoque antes do registro da fatura; o lote é tudo ou
        // nada, então uma falha aqui deixa os dois stores intocados.
        let deltas: Vec<(Uuid, u32)> = items.iter().map(|i| (i.product_id, i.quantity)).collect();
        products.decrement_batch(&deltas)?;

        let invoice_number = invoices.next_invoice_number(draft.date);
        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number,
            customer_id,
            customer_name,
            date: draft.date,
            due_date: draft.due_date,
            items,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            discount_amount: totals.discount_amount,
            total: totals.total,
            status: InvoiceStatus::Draft,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        invoices.append(invoice.clone());
        tracing::info!(
            numero = %invoice.invoice_number,
            cliente = %invoice.customer_name,
            total = %invoice.total,
            "Fatura confirmada e estoque baixado"
        );

        Ok(invoice)
    }

    /// Valores recalculados com a alíquota de hoje, para exibição lado a lado
    /// com os valores congelados. Nada disso é persistido: a fatura continua
    /// sendo o snapshot da data de criação.
    pub fn recompute_at_rate(&self, invoice: &Invoice, tax_rate: Decimal) -> InvoiceTotals {
        let tax_amount = invoice.subtotal * tax_rate / Decimal::from(100);
        let total = (invoice.subtotal + tax_amount - invoice.discount_amount).max(Decimal::ZERO);

        InvoiceTotals {
            subtotal: invoice.subtotal,
            tax_amount,
            discount_amount: invoice.discount_amount,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::models::customer::CustomerInput;
    use crate::models::invoice::LineRequest;
    use crate::models::product::ProductInput;
    use crate::store::json_store::JsonCollection;

    fn stores() -> (tempfile::TempDir, CustomerStore, ProductStore) {
        let dir = tempfile::tempdir().unwrap();
        // Coleções vazias pré-gravadas para não carregar os dados de seed.
        for name in ["customers.json", "products.json"] {
            JsonCollection::new(dir.path(), name).save(&Vec::<serde_json::Value>::new());
        }
        let customers = CustomerStore::open(JsonCollection::new(dir.path(), "customers.json"));
        let products = ProductStore::open(JsonCollection::new(dir.path(), "products.json"));
        (dir, customers, products)
    }

    fn add_customer(customers: &mut CustomerStore, name: &str) -> Uuid {
        customers
            .add(CustomerInput {
                name: name.into(),
                email: None,
                phone: None,
                address: None,
                tax_number: None,
            })
            .unwrap()
            .id
    }

    fn add_product(
        products: &mut ProductStore,
        name: &str,
        price: Decimal,
        quantity: u32,
    ) -> Uuid {
        products
            .add(ProductInput {
                name: name.into(),
                description: None,
                price,
                quantity,
                category: None,
                sku: None,
                image_url: None,
            })
            .unwrap()
            .id
    }

    fn item(quantity: u32, unit_price: Decimal) -> InvoiceItem {
        InvoiceItem {
            product_id: Uuid::new_v4(),
            product_name: "Produto".into(),
            quantity,
            unit_price,
            total: Decimal::from(quantity) * unit_price,
        }
    }

    #[test]
    fn totais_com_imposto_simples() {
        let engine = InvoiceEngine::new();
        let totals = engine.compute_totals(&[item(4, dec!(100.00))], dec!(15), Decimal::ZERO);

        assert_eq!(totals.subtotal, dec!(400.00));
        assert_eq!(totals.tax_amount, dec!(60.00));
        assert_eq!(totals.total, dec!(460.00));
    }

    #[test]
    fn totais_com_duas_linhas_e_desconto() {
        let engine = InvoiceEngine::new();
        let items = [item(2, dec!(50.00)), item(3, dec!(20.00))];
        let totals = engine.compute_totals(&items, dec!(15), dec!(10.00));

        assert_eq!(totals.subtotal, dec!(160.00));
        assert_eq!(totals.tax_amount, dec!(24.00));
        assert_eq!(totals.discount_amount, dec!(10.00));
        assert_eq!(totals.total, dec!(174.00));
    }

    #[test]
    fn desconto_maior_que_o_total_trava_em_zero() {
        let engine = InvoiceEngine::new();
        // subtotal + imposto = 100; desconto de 200 não pode negativar.
        let totals = engine.compute_totals(&[item(1, dec!(100.00))], Decimal::ZERO, dec!(200.00));

        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec!(100.00));
    }

    #[test]
    fn relatorio_de_disponibilidade_marca_cada_linha() {
        let (_dir, mut customers, mut products) = stores();
        let engine = InvoiceEngine::new();
        let customer = add_customer(&mut customers, "Cliente");
        let plenty = add_product(&mut products, "Teclado", dec!(100.00), 10);
        let scarce = add_product(&mut products, "Mouse", dec!(50.00), 2);
        let unknown = Uuid::new_v4();

        let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        let mut draft = InvoiceDraft::new(customer, date);
        draft.items.push(LineRequest {
            product_id: Some(plenty),
            quantity: 4,
            unit_price: dec!(100.00),
        });
        draft.items.push(LineRequest {
            product_id: Some(scarce),
            quantity: 5,
            unit_price: dec!(50.00),
        });
        // Id que não existe no catálogo: aparece com saldo zero.
        draft.items.push(LineRequest {
            product_id: Some(unknown),
            quantity: 1,
            unit_price: dec!(1.00),
        });

        let report = engine.availability_report(&products, &draft);
        assert_eq!(report.len(), 3);

        assert_eq!(report[0].product_name, "Teclado");
        assert_eq!(report[0].requested, 4);
        assert_eq!(report[0].available, 10);
        assert!(report[0].sufficient);

        assert_eq!(report[1].product_name, "Mouse");
        assert_eq!(report[1].requested, 5);
        assert_eq!(report[1].available, 2);
        assert!(!report[1].sufficient);

        assert_eq!(report[2].product_id, unknown);
        assert_eq!(report[2].product_name, "");
        assert_eq!(report[2].available, 0);
        assert!(!report[2].sufficient);
    }

    #[test]
    fn desconto_negativo_e_rejeitado_sem_tocar_o_estoque() {
        let (_dir, mut customers, mut products) = stores();
        let engine = InvoiceEngine::new();
        let customer = add_customer(&mut customers, "Cliente");
        let product = add_product(&mut products, "Teclado", dec!(100.00), 10);

        let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        let mut draft = InvoiceDraft::new(customer, date);
        draft.discount_amount = dec!(-5.00);
        draft.items.push(LineRequest {
            product_id: Some(product),
            quantity: 1,
            unit_price: dec!(100.00),
        });

        let err = engine.validate(&customers, &products, &draft).unwrap_err();
        assert!(matches!(err, AppError::NegativeDiscount));
        assert_eq!(products.get(product).unwrap().quantity, 10);
    }

    #[test]
    fn recomputo_na_aliquota_atual_nao_muda_o_subtotal() {
        let engine = InvoiceEngine::new();
        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number: "INV-20240101-001".into(),
            customer_id: Uuid::new_v4(),
            customer_name: "Cliente".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: None,
            items: Vec::new(),
            subtotal: dec!(400.00),
            tax_amount: dec!(60.00),
            discount_amount: Decimal::ZERO,
            total: dec!(460.00),
            status: InvoiceStatus::Draft,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let preview = engine.recompute_at_rate(&invoice, dec!(10));
        assert_eq!(preview.subtotal, dec!(400.00));
        assert_eq!(preview.tax_amount, dec!(40.00));
        assert_eq!(preview.total, dec!(440.00));

        // Os valores congelados da fatura ficam como estavam.
        assert_eq!(invoice.tax_amount, dec!(60.00));
        assert_eq!(invoice.total, dec!(460.00));
    }
}
