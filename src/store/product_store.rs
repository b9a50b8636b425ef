// src/store/product_store.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::product::{Product, ProductInput, ProductPatch};
use crate::store::json_store::JsonCollection;
use crate::store::seed;

/// Limite de reposição padrão da tela de estoque.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

pub struct ProductStore {
    records: Vec<Product>,
    collection: JsonCollection,
}

impl ProductStore {
    pub fn open(collection: JsonCollection) -> Self {
        let records = collection.load_or_seed(seed::products);
        Self { records, collection }
    }

    fn persist(&self) {
        self.collection.save(&self.records);
    }

    // --- CRUD ---

    pub fn add(&mut self, input: ProductInput) -> Result<Product, AppError> {
        input.validate()?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let sku = input
            .sku
            .filter(|sku| !sku.trim().is_empty())
            .unwrap_or_else(|| generate_sku(id));

        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            sku,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        };

        self.records.push(product.clone());
        self.persist();
        Ok(product)
    }

    /// Atualização parcial; id inexistente é um no-op silencioso.
    pub fn update(&mut self, id: Uuid, patch: ProductPatch) -> Result<(), AppError> {
        patch.validate()?;

        let Some(product) = self.records.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        if let Some(category) = patch.category {
            product.category = Some(category);
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = Some(image_url);
        }
        product.updated_at = Utc::now();

        self.persist();
        Ok(())
    }

    /// Remoção incondicional, sem checagem referencial: faturas guardam
    /// snapshots de nome e preço e não dependem do registro vivo.
    pub fn remove(&mut self, id: Uuid) {
        self.records.retain(|p| p.id != id);
        self.persist();
    }

    // --- Consultas ---

    pub fn get(&self, id: Uuid) -> Option<&Product> {
        self.records.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Product] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.records
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect()
    }

    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.records
            .iter()
            .filter(|p| p.quantity <= threshold)
            .collect()
    }

    /// Valor total imobilizado no catálogo (Σ preço x saldo).
    pub fn total_stock_value(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc + p.stock_value())
    }

    pub fn total_stock_units(&self) -> u64 {
        self.records.iter().map(|p| u64::from(p.quantity)).sum()
    }

    // --- Mutações de estoque ---

    /// Ajuste manual da tela de estoque (+/-1). Satura em zero; id
    /// inexistente é um no-op.
    pub fn adjust_quantity(&mut self, id: Uuid, delta: i32) {
        let Some(product) = self.records.iter_mut().find(|p| p.id == id) else {
            return;
        };

        product.quantity = if delta >= 0 {
            product.quantity.saturating_add(delta as u32)
        } else {
            product.quantity.saturating_sub(delta.unsigned_abs())
        };
        product.updated_at = Utc::now();

        self.persist();
    }

    /// Baixa de estoque de uma fatura confirmada, em duas fases: valida todos
    /// os deltas contra o saldo atual (somando linhas repetidas do mesmo
    /// produto) e só então aplica todos. Qualquer falha deixa o estoque
    /// intocado.
    pub fn decrement_batch(&mut self, deltas: &[(Uuid, u32)]) -> Result<(), AppError> {
        let mut requested: HashMap<Uuid, u32> = HashMap::new();
        for (id, quantity) in deltas {
            *requested.entry(*id).or_insert(0) += quantity;
        }

        // Fase 1: tudo ou nada.
        for (id, _) in deltas {
            let product = self
                .records
                .iter()
                .find(|p| p.id == *id)
                .ok_or(AppError::ProductNotFound(*id))?;

            let total_requested = requested[id];
            if total_requested > product.quantity {
                return Err(AppError::InsufficientStock {
                    name: product.name.clone(),
                    requested: total_requested,
                    available: product.quantity,
                });
            }
        }

        // Fase 2: aplica o lote inteiro. A fase 1 garante que todo id existe.
        let now = Utc::now();
        for (id, quantity) in &requested {
            if let Some(product) = self.records.iter_mut().find(|p| p.id == *id) {
                product.quantity -= quantity;
                product.updated_at = now;
            }
        }

        self.persist();
        Ok(())
    }
}

fn generate_sku(id: Uuid) -> String {
    let short = &id.simple().to_string()[..8];
    format!("PRD-{}", short.to_uppercase())
}
