#![allow(dead_code, unused_imports)]
#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # AgroDiagnóstico — Sistema Especialista Agrícola
//!
//! **Ponto de entrada principal** da aplicação AgroDiagnóstico.
//!
//! O sistema diagnostica problemas de saúde de lavouras a partir de
//! sintomas observados e leituras ambientais, executando uma base de
//! ~30 regras declarativas se-então sobre um conjunto de fatos até que
//! nenhuma conclusão nova possa ser derivada (encadeamento progressivo
//! até a quiescência).
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Monta a base de regras (30 regras + coleta) em Arc
//!   ├── Prepara a trilha de auditoria (data/)
//!   ├── Monta AppState e Router
//!   └── Inicia servidor TCP (porta 5000)
//! ```
//!
//! ## Fluxo de uma Requisição
//!
//! ```text
//! POST /diagnosticar [ {tipo, dados}, ... ]
//!   ├── motor novo, memória de trabalho isolada
//!   ├── valida e insere os fatos do chamador
//!   ├── casa → seleciona → age, até a quiescência
//!   ├── formata tokens para texto legível
//!   ├── anexa a trilha de auditoria (txt + jsonl)
//!   └── devolve a lista final como JSON
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Executar com logs detalhados (cada disparo de regra)
//! RUST_LOG=debug cargo run
//!
//! # O servidor estará disponível em http://localhost:5000
//! ```

// Declaração dos módulos da aplicação.
// Cada módulo corresponde a uma camada da arquitetura:

/// Módulo `audit` — trilha append-only dos diagnósticos (txt + jsonl).
mod audit;

/// Módulo `core` — tipos fundamentais: Value, Fact, ResultRecord, WorkingMemory.
mod core;

/// Módulo `engine` — motor de inferência: casador, agenda, laço de execução.
mod engine;

/// Módulo `error` — as três classes de falha de uma execução.
mod error;

/// Módulo `format` — tokens internos para texto legível.
mod format;

/// Módulo `rules` — a base de conhecimento agrícola (tabela fixa).
mod rules;

/// Módulo `web` — servidor web axum, handlers HTTP e template.
mod web;

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::audit::AuditLog;
use crate::web::state::AppState;

/// Função principal assíncrona do AgroDiagnóstico.
///
/// A base de regras é montada **uma vez** e compartilhada entre todas as
/// requisições; cada diagnóstico constrói seu próprio motor com memória
/// de trabalho isolada, então não há estado mutável compartilhado além
/// da trilha de auditoria (que serializa seus appends internamente).
///
/// # Erros
///
/// Retorna erro se:
/// - Não conseguir fazer bind na porta 5000
/// - O servidor axum falhar durante execução
#[tokio::main]
async fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    // Exemplo: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🌱 AgroDiagnóstico — Starting...");

    // Monta a base de conhecimento. É uma tabela fixa de dados — montar
    // é barato e acontece antes do bind, então /status pode responder
    // `ready: true` incondicionalmente.
    let ruleset = Arc::new(rules::ruleset());
    tracing::info!(regras = ruleset.len(), "base de conhecimento carregada");

    // Trilha de auditoria em data/ — criada sob demanda no primeiro diagnóstico.
    let audit = Arc::new(AuditLog::new("data"));

    // Estado compartilhado da aplicação — passado para todos os handlers via axum State.
    let state = AppState { ruleset, audit };

    // Cria o router com todas as rotas da aplicação.
    let app = web::create_router(state);

    let addr = "0.0.0.0:5000";
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running at http://localhost:5000");

    // Inicia o servidor axum — bloqueia até que o processo seja encerrado.
    axum::serve(listener, app).await?;

    Ok(())
}
