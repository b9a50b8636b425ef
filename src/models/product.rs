// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Item do catálogo. A quantidade é o saldo físico em unidades inteiras;
/// ela só muda pelo ajuste manual do estoque (+/-1) e pela baixa de uma
/// fatura confirmada.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub category: Option<String>,
    pub sku: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados do formulário de produto. O id, o SKU (quando ausente) e os
/// timestamps são atribuídos pelo store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = validate_amount, message = "O preço não pode ser negativo"))]
    pub price: Decimal,
    pub quantity: u32,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
}

/// Atualização parcial: apenas os campos presentes são aplicados.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = validate_amount, message = "O preço não pode ser negativo"))]
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

// Valores monetários são sempre não negativos; zero é aceito.
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

impl Product {
    /// Valor imobilizado neste produto (preço x saldo).
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn preco_negativo_falha_na_validacao() {
        let input = ProductInput {
            name: "Monitor".into(),
            description: None,
            price: dec!(-10.00),
            quantity: 3,
            category: None,
            sku: None,
            image_url: None,
        };
        assert!(input.validate().is_err());

        let patch = ProductPatch {
            price: Some(dec!(-1.00)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn preco_zero_e_aceito() {
        let input = ProductInput {
            name: "Brinde".into(),
            description: None,
            price: Decimal::ZERO,
            quantity: 1,
            category: None,
            sku: None,
            image_url: None,
        };
        assert!(input.validate().is_ok());
    }
}
