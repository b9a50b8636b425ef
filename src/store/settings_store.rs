// src/store/settings_store.rs
//
// Provedor de configurações: alíquota, moeda e formatação, mais o
// backup/restauração em um único documento JSON. O motor de faturas não lê
// este store diretamente; quem chama o motor busca `tax_rate()` aqui e passa
// o valor como parâmetro explícito.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;
use crate::models::settings::{
    BACKUP_VERSION, CompanySettings, CompanySettingsPatch, InvoiceSettings,
    InvoiceSettingsPatch, Language, SettingsBackup, UserSettings, UserSettingsPatch,
};
use crate::store::json_store::JsonCollection;

/// Forma persistida: as três seções juntas em um arquivo só.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsBundle {
    company: CompanySettings,
    user: UserSettings,
    invoice: InvoiceSettings,
}

pub struct SettingsStore {
    bundle: SettingsBundle,
    collection: JsonCollection,
}

impl SettingsStore {
    pub fn open(collection: JsonCollection) -> Self {
        let bundle = collection.try_load().unwrap_or_default();
        Self { bundle, collection }
    }

    fn persist(&self) {
        self.collection.save(&self.bundle);
    }

    // --- Acesso ---

    pub fn company(&self) -> &CompanySettings {
        &self.bundle.company
    }

    pub fn user(&self) -> &UserSettings {
        &self.bundle.user
    }

    pub fn invoice(&self) -> &InvoiceSettings {
        &self.bundle.invoice
    }

    /// Alíquota vigente, em percentual. Lida pelo chamador no momento da
    /// confirmação da fatura; nunca aplicada retroativamente.
    pub fn tax_rate(&self) -> Decimal {
        self.bundle.company.tax_rate
    }

    // --- Atualizações parciais ---

    pub fn update_company(&mut self, patch: CompanySettingsPatch) {
        let company = &mut self.bundle.company;
        if let Some(v) = patch.company_name {
            company.company_name = v;
        }
        if let Some(v) = patch.company_address {
            company.company_address = v;
        }
        if let Some(v) = patch.company_phone {
            company.company_phone = v;
        }
        if let Some(v) = patch.company_email {
            company.company_email = v;
        }
        if let Some(v) = patch.tax_number {
            company.tax_number = v;
        }
        if let Some(v) = patch.currency {
            company.currency = v;
        }
        if let Some(v) = patch.currency_symbol {
            company.currency_symbol = v;
        }
        if let Some(v) = patch.tax_rate {
            company.tax_rate = v;
        }
        if let Some(v) = patch.language {
            company.language = v;
        }
        self.persist();
    }

    pub fn update_user(&mut self, patch: UserSettingsPatch) {
        let user = &mut self.bundle.user;
        if let Some(v) = patch.notifications_email {
            user.notifications_email = v;
        }
        if let Some(v) = patch.notifications_browser {
            user.notifications_browser = v;
        }
        if let Some(v) = patch.auto_backup {
            user.auto_backup = v;
        }
        if let Some(v) = patch.theme {
            user.theme = v;
        }
        self.persist();
    }

    pub fn update_invoice(&mut self, patch: InvoiceSettingsPatch) {
        let invoice = &mut self.bundle.invoice;
        if let Some(v) = patch.auto_numbering {
            invoice.auto_numbering = v;
        }
        if let Some(v) = patch.due_date_reminder {
            invoice.due_date_reminder = v;
        }
        if let Some(v) = patch.auto_save_drafts {
            invoice.auto_save_drafts = v;
        }
        self.persist();
    }

    // --- Cálculo e formatação ---

    pub fn calculate_tax(&self, amount: Decimal) -> Decimal {
        amount * self.bundle.company.tax_rate / Decimal::from(100)
    }

    pub fn calculate_total(&self, amount: Decimal, include_tax: bool) -> Decimal {
        if include_tax {
            amount + self.calculate_tax(amount)
        } else {
            amount
        }
    }

    /// Valor com duas casas, separador de milhar e o símbolo da moeda na
    /// posição do idioma configurado (árabe: depois; inglês: antes).
    pub fn format_currency(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let negative = rounded.is_sign_negative();
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (text.as_str(), "00"),
        };

        let sign = if negative { "-" } else { "" };
        let grouped = group_thousands(int_part);
        let number = format!("{sign}{grouped}.{frac_part}");

        let symbol = &self.bundle.company.currency_symbol;
        match self.bundle.company.language {
            Language::Ar => format!("{number} {symbol}"),
            Language::En => format!("{symbol} {number}"),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    // --- Backup ---

    /// Documento único com as três seções, timestamp e versão.
    pub fn export_backup(&self) -> SettingsBackup {
        SettingsBackup {
            company_settings: Some(self.bundle.company.clone()),
            user_settings: Some(self.bundle.user.clone()),
            invoice_settings: Some(self.bundle.invoice.clone()),
            timestamp: Utc::now(),
            version: BACKUP_VERSION.into(),
        }
    }

    pub fn export_backup_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.export_backup())?)
    }

    /// Restaura um backup: cada seção presente sobrescreve a atual por
    /// inteiro. JSON inválido ou sem nenhuma seção conhecida é rejeitado e o
    /// estado atual permanece intocado.
    pub fn import_backup(&mut self, raw: &str) -> Result<(), AppError> {
        let backup: SettingsBackup =
            serde_json::from_str(raw).map_err(|err| AppError::MalformedBackup {
                reason: err.to_string(),
            })?;

        if backup.company_settings.is_none()
            && backup.user_settings.is_none()
            && backup.invoice_settings.is_none()
        {
            return Err(AppError::MalformedBackup {
                reason: "nenhuma seção de configurações encontrada".into(),
            });
        }

        if let Some(company) = backup.company_settings {
            self.bundle.company = company;
        }
        if let Some(user) = backup.user_settings {
            self.bundle.user = user;
        }
        if let Some(invoice) = backup.invoice_settings {
            self.bundle.invoice = invoice;
        }

        self.persist();
        tracing::info!("Configurações restauradas do backup");
        Ok(())
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
