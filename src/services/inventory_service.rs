// src/services/inventory_service.rs
//
// Ajustes manuais de estoque (os botões ±1 da tela de inventário) e o resumo
// agregado. A baixa em lote na confirmação de fatura NÃO passa por aqui; ela
// pertence ao motor de faturas.

use uuid::Uuid;

use crate::models::dashboard::InventoryOverview;
use crate::models::product::Product;
use crate::store::product_store::{DEFAULT_LOW_STOCK_THRESHOLD, ProductStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        Self
    }

    /// Incrementa uma unidade. Produto inexistente é um no-op silencioso.
    pub fn increment(&self, products: &mut ProductStore, id: Uuid) {
        products.adjust_quantity(id, 1);
    }

    /// Decrementa uma unidade, saturando em zero.
    pub fn decrement(&self, products: &mut ProductStore, id: Uuid) {
        products.adjust_quantity(id, -1);
    }

    pub fn low_stock<'a>(&self, products: &'a ProductStore) -> Vec<&'a Product> {
        products.low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    pub fn overview(&self, products: &ProductStore) -> InventoryOverview {
        InventoryOverview {
            total_products: products.len(),
            total_stock_units: products.total_stock_units(),
            total_stock_value: products.total_stock_value(),
            low_stock_count: products.low_stock(DEFAULT_LOW_STOCK_THRESHOLD).len(),
        }
    }
}
