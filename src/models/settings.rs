// src/models/settings.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

/// Dados fiscais e de formatação da empresa. A alíquota (`tax_rate`, em
/// percentual) é lida pelo motor de faturas apenas no momento da confirmação;
/// faturas antigas nunca são recalculadas quando ela muda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub company_name: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub tax_number: String,
    pub currency: String,
    pub currency_symbol: String,
    pub tax_rate: Decimal,
    pub language: Language,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            company_name: "شركتي".into(),
            company_address: "الرياض، المملكة العربية السعودية".into(),
            company_phone: "+966501234567".into(),
            company_email: "info@mycompany.com".into(),
            tax_number: "123456789".into(),
            currency: "ريال".into(),
            currency_symbol: "ر.س".into(),
            tax_rate: Decimal::from(15),
            language: Language::Ar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub notifications_email: bool,
    pub notifications_browser: bool,
    pub auto_backup: bool,
    pub theme: Theme,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            notifications_email: true,
            notifications_browser: true,
            auto_backup: true,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSettings {
    pub auto_numbering: bool,
    pub due_date_reminder: bool,
    pub auto_save_drafts: bool,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            auto_numbering: true,
            due_date_reminder: true,
            auto_save_drafts: true,
        }
    }
}

// --- Atualizações parciais ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettingsPatch {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub tax_number: Option<String>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsPatch {
    pub notifications_email: Option<bool>,
    pub notifications_browser: Option<bool>,
    pub auto_backup: Option<bool>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSettingsPatch {
    pub auto_numbering: Option<bool>,
    pub due_date_reminder: Option<bool>,
    pub auto_save_drafts: Option<bool>,
}

// --- Backup ---

/// Documento único de exportação das configurações. Na importação, cada seção
/// presente sobrescreve a atual por inteiro; nenhuma outra checagem de schema
/// é feita além da presença das chaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsBackup {
    pub company_settings: Option<CompanySettings>,
    pub user_settings: Option<UserSettings>,
    pub invoice_settings: Option<InvoiceSettings>,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

pub const BACKUP_VERSION: &str = "1.0.0";
