// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório"))]
    pub name: String,

    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,

    #[validate(custom(function = validate_phone))]
    pub phone: Option<String>,

    pub address: Option<String>,
    pub tax_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
}

// Formato de celular saudita: prefixo +966/966/0 opcional, nove dígitos
// começando em 5. Espaços são ignorados.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("+966")
        .or_else(|| cleaned.strip_prefix("966"))
        .or_else(|| cleaned.strip_prefix('0'))
        .unwrap_or(&cleaned);

    let ok = digits.len() == 9
        && digits.starts_with('5')
        && digits.chars().all(|c| c.is_ascii_digit());

    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_formatos_de_telefone_validos() {
        for phone in ["+966501234567", "966501234567", "0501234567", "501234567", "+966 50 123 4567"] {
            assert!(validate_phone(phone).is_ok(), "deveria aceitar {phone}");
        }
    }

    #[test]
    fn rejeita_telefones_invalidos() {
        for phone in ["12345", "+9665012345678", "0401234567", "abc501234567"] {
            assert!(validate_phone(phone).is_err(), "deveria rejeitar {phone}");
        }
    }

    #[test]
    fn input_sem_nome_falha_na_validacao() {
        let input = CustomerInput {
            name: String::new(),
            email: None,
            phone: None,
            address: None,
            tax_number: None,
        };
        assert!(input.validate().is_err());
    }
}
