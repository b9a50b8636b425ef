use thiserror::Error;
use uuid::Uuid;

use crate::models::invoice::InvoiceStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
//
// Erros de validação bloqueiam a operação inteira antes de qualquer mutação.
// Falhas de persistência dos stores NÃO aparecem aqui: são registradas via
// tracing e recuperadas localmente (fallback para os dados de seed).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Selecione um cliente para a fatura")]
    MissingCustomer,

    #[error("A fatura precisa de pelo menos um item com quantidade maior que zero")]
    EmptyCart,

    #[error("O desconto não pode ser negativo")]
    NegativeDiscount,

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    #[error("Estoque insuficiente de \"{name}\": pedido {requested}, disponível {available}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("Transição de status inválida: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    // Arquivo de backup malformado na importação; o estado atual não é tocado.
    #[error("Arquivo de backup inválido: {reason}")]
    MalformedBackup { reason: String },

    #[error("Falha de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    // Apenas nos caminhos de exportação (relatórios e backup), onde a falha
    // de escrita é do chamador e deve ser reportada, não engolida.
    #[error("Falha de E/S: {0}")]
    Io(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno")]
    Internal(#[from] anyhow::Error),
}
