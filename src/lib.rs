//! contalocal — núcleo de contabilidade para pequenos negócios.
//!
//! Catálogo de produtos, cadastro de clientes, faturamento com baixa de
//! estoque, despesas, relatórios e configurações, tudo persistido em arquivos
//! JSON locais (um arquivo por coleção). A interface gráfica é um colaborador
//! externo: ela chama os stores e serviços expostos aqui e apresenta o
//! resultado.

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppState;
