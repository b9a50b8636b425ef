pub mod dashboard_service;
pub mod inventory_service;
pub mod invoice_engine;
pub mod report_service;

pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use invoice_engine::{InvoiceEngine, LineAvailability};
pub use report_service::ReportService;
