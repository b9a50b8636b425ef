pub mod customer;
pub mod dashboard;
pub mod expense;
pub mod invoice;
pub mod product;
pub mod settings;

pub use customer::{Customer, CustomerInput, CustomerPatch};
pub use dashboard::{
    CategoryTotal, DashboardSummary, ExpenseReport, ExpenseReportSummary, InventoryOverview,
    InvoiceReport, InvoiceReportSummary, ReportPeriod,
};
pub use expense::{Expense, ExpenseInput, ExpensePatch};
pub use invoice::{Invoice, InvoiceDraft, InvoiceItem, InvoiceStatus, InvoiceTotals, LineRequest};
pub use product::{Product, ProductInput, ProductPatch};
pub use settings::{
    CompanySettings, CompanySettingsPatch, InvoiceSettings, InvoiceSettingsPatch, Language,
    SettingsBackup, Theme, UserSettings, UserSettingsPatch,
};
