// src/config.rs
//
// Montagem do estado da aplicação: abre o diretório de dados, carrega cada
// coleção JSON (com fallback para os dados de seed) e instancia os serviços.

use std::path::PathBuf;

use anyhow::Context;

use crate::services::{DashboardService, InventoryService, InvoiceEngine, ReportService};
use crate::store::{
    CustomerStore, ExpenseStore, InvoiceStore, JsonCollection, ProductStore, SettingsStore,
};

const DATA_DIR_VAR: &str = "CONTALOCAL_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./data";

/// Todas as coleções e serviços em um único agregado, pronto para a camada de
/// interface consumir. Os serviços são sem estado; os stores carregam tudo em
/// memória na abertura e regravam o arquivo inteiro a cada mutação.
pub struct AppState {
    pub products: ProductStore,
    pub customers: CustomerStore,
    pub invoices: InvoiceStore,
    pub expenses: ExpenseStore,
    pub settings: SettingsStore,
    pub engine: InvoiceEngine,
    pub inventory: InventoryService,
    pub dashboard: DashboardService,
    pub reports: ReportService,
}

impl AppState {
    /// Abre o estado usando `CONTALOCAL_DATA_DIR` (ou `./data`), lendo o
    /// `.env` se existir.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = std::env::var(DATA_DIR_VAR).unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
        Self::with_data_dir(data_dir)
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("criando o diretório de dados {}", data_dir.display()))?;

        let state = Self {
            products: ProductStore::open(JsonCollection::new(&data_dir, "products.json")),
            customers: CustomerStore::open(JsonCollection::new(&data_dir, "customers.json")),
            invoices: InvoiceStore::open(
                JsonCollection::new(&data_dir, "invoices.json"),
                JsonCollection::new(&data_dir, "invoice-counter.json"),
            ),
            expenses: ExpenseStore::open(JsonCollection::new(&data_dir, "expenses.json")),
            settings: SettingsStore::open(JsonCollection::new(&data_dir, "settings.json")),
            engine: InvoiceEngine::new(),
            inventory: InventoryService::new(),
            dashboard: DashboardService::new(),
            reports: ReportService::new(),
        };

        tracing::info!(
            dir = %data_dir.display(),
            produtos = state.products.len(),
            clientes = state.customers.len(),
            faturas = state.invoices.len(),
            "Coleções carregadas"
        );

        Ok(state)
    }
}

/// Inicializa o tracing com filtro via `RUST_LOG`. Idempotente: chamadas
/// repetidas (testes) são ignoradas.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}
