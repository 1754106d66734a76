//! # Estado da Aplicação Web
//!
//! Define o estado compartilhado entre todos os handlers Axum.
//!
//! Diferente de sistemas com memória entre requisições, aqui o estado é
//! mínimo e imutável: a base de regras é montada uma única vez na
//! inicialização e apenas **lida** pelos handlers — cada requisição de
//! diagnóstico constrói seu próprio motor com memória de trabalho
//! isolada. A trilha de auditoria é o único recurso com escrita
//! compartilhada, e ela serializa os appends internamente.

use std::sync::Arc;

use crate::audit::AuditLog;
use crate::engine::Ruleset;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Base de conhecimento imutável, compartilhada entre requisições.
    pub ruleset: Arc<Ruleset>,
    /// Trilha de auditoria append-only.
    pub audit: Arc<AuditLog>,
}
