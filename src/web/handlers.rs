//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`].
//!
//! | Handler | Método | Retorno | Uso |
//! |---------|--------|---------|-----|
//! | `index` | GET | HTML completo | Página principal (Maud) |
//! | `engine_status` | GET | JSON | Sonda de prontidão |
//! | `diagnose` | POST | JSON | Executa o motor e devolve o relatório |
//!
//! ## Mapeamento de Erros
//!
//! O contrato de `POST /diagnosticar` separa culpa do chamador de
//! defeito interno:
//!
//! - [`FactValidation`](DiagnosticoError::FactValidation) → `400` com
//!   `{ "erro": ... }` — entrada que a base de regras não interpreta;
//! - [`CycleLimit`](DiagnosticoError::CycleLimit) e
//!   [`RuleAction`](DiagnosticoError::RuleAction) → `500`, logados como
//!   erro — defeitos da base ou do motor, nunca engolidos em silêncio.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use super::state::AppState;
use super::templates;
use crate::core::{InputFact, ResultRecord};
use crate::engine::DiagnosticEngine;
use crate::error::DiagnosticoError;
use crate::format;

/// Resposta do endpoint `/status`.
#[derive(serde::Serialize)]
pub struct StatusResponse {
    /// Sempre `true` — a base de regras é carregada antes do bind.
    pub ready: bool,
    /// Número de regras carregadas (30 de domínio + coleta).
    pub regras: usize,
}

/// GET `/` — Página principal do construtor de fatos.
pub async fn index() -> Html<String> {
    Html(templates::full_page().into_string())
}

/// GET `/status` — Sonda de prontidão com o tamanho da base carregada.
pub async fn engine_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: true,
        regras: state.ruleset.len(),
    })
}

/// POST `/diagnosticar` — Executa o motor sobre os fatos do chamador.
///
/// ## Fluxo
///
/// ```text
/// 1. Deserializa a lista de fatos do corpo JSON
/// 2. Constrói um motor novo (memória de trabalho isolada)
/// 3. declare_input() valida e insere os fatos
/// 4. run() executa até a quiescência → relatório bruto
/// 5. Formata os tokens para texto legível
/// 6. Registra a trilha de auditoria (falha não afeta a resposta)
/// 7. Devolve a lista final como JSON
/// ```
pub async fn diagnose(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<InputFact>>,
) -> Response {
    let requisicao = Uuid::new_v4();
    tracing::info!(requisicao = %requisicao, fatos = inputs.len(), "diagnóstico solicitado");

    let mut engine = DiagnosticEngine::new(state.ruleset.clone());
    let report = match engine
        .declare_input(&inputs)
        .and_then(|()| engine.run())
    {
        Ok(report) => report,
        Err(e) => return error_response(requisicao, &e),
    };

    let formatted: Vec<ResultRecord> = report.iter().map(format::humanize_record).collect();
    tracing::info!(
        requisicao = %requisicao,
        registros = formatted.len(),
        "diagnóstico concluído"
    );

    // trilha de auditoria — observacional, nunca derruba a resposta
    if let Err(e) = state.audit.record(requisicao, &formatted) {
        tracing::error!(requisicao = %requisicao, error = %e, "falha ao registrar auditoria");
    }

    Json(formatted).into_response()
}

/// Converte um erro do motor na resposta HTTP adequada.
fn error_response(requisicao: Uuid, e: &DiagnosticoError) -> Response {
    let status = if e.caused_by_caller() {
        tracing::warn!(requisicao = %requisicao, error = %e, "entrada rejeitada");
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(requisicao = %requisicao, error = %e, "defeito interno do motor");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(serde_json::json!({ "erro": e.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_serializes_rule_count() {
        let json = serde_json::to_value(StatusResponse {
            ready: true,
            regras: 31,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "ready": true, "regras": 31 }));
    }
}
