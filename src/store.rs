pub mod customer_store;
pub mod expense_store;
pub mod invoice_store;
pub mod json_store;
pub mod product_store;
pub mod seed;
pub mod settings_store;

pub use customer_store::CustomerStore;
pub use expense_store::ExpenseStore;
pub use invoice_store::InvoiceStore;
pub use json_store::JsonCollection;
pub use product_store::{ProductStore, DEFAULT_LOW_STOCK_THRESHOLD};
pub use settings_store::SettingsStore;
