//! # Módulo Web — A Interface do Sistema Especialista
//!
//! Este módulo organiza toda a camada web da aplicação, construída com
//! **Axum** + **Maud**. Ela é um invólucro fino sobre o contrato de
//! entrada/saída do motor: nenhuma decisão de diagnóstico vive aqui.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Browser (construtor de fatos + fetch JSON)             │
//! ├────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                              │
//! │  ├── GET  /              → página principal (Maud)     │
//! │  ├── GET  /status        → JSON: base carregada?       │
//! │  └── POST /diagnosticar  → JSON: relatório formatado   │
//! ├────────────────────────────────────────────────────────┤
//! │ Static Assets (tower_http::ServeDir → /assets/)        │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Template Maud da página principal |

pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
///
/// O estado `AppState` é compartilhado entre todos os handlers via
/// extrator `State<AppState>` do Axum.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Página HTML ───────────────────────────────────────
        .route("/", get(handlers::index))
        // ── API JSON ──────────────────────────────────────────
        .route("/status", get(handlers::engine_status))
        .route("/diagnosticar", post(handlers::diagnose))
        // ── Arquivos estáticos ────────────────────────────────
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(state)
}
