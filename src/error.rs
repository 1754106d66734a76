//! # Erros do Motor de Diagnóstico
//!
//! Três classes de falha, com fronteiras bem distintas:
//!
//! | Variante | Causa | Tratamento na borda HTTP |
//! |----------|-------|--------------------------|
//! | [`DiagnosticoError::FactValidation`] | entrada do chamador (tipo de fato desconhecido, atributo fora do vocabulário, valor não-numérico em comparação numérica) | `400 Bad Request` |
//! | [`DiagnosticoError::CycleLimit`] | defeito na base de regras (encadeamento cíclico não previsto) | `500`, logado como erro |
//! | [`DiagnosticoError::RuleAction`] | falha interna ao executar uma ação (ex: modificar fato já retratado) | `500`, logado como erro |
//!
//! O motor nunca tenta novamente: cada execução atinge quiescência ou
//! falha exatamente uma vez, sem lista parcial de resultados.

use thiserror::Error;

/// Erro de uma execução do motor de diagnóstico.
#[derive(Error, Debug)]
pub enum DiagnosticoError {
    /// A entrada do chamador não pôde ser interpretada pela base de regras.
    #[error("fato inválido: {0}")]
    FactValidation(String),

    /// O laço de execução excedeu o teto de disparos.
    #[error("limite de {limite} disparos excedido; possível ciclo na base de regras")]
    CycleLimit {
        /// Teto de disparos vigente na execução que falhou.
        limite: usize,
    },

    /// Uma ação de regra falhou de forma inesperada.
    #[error("falha ao executar ação de regra: {0}")]
    RuleAction(String),
}

impl DiagnosticoError {
    /// Constrói um erro de validação de entrada.
    pub fn validacao(msg: impl Into<String>) -> Self {
        DiagnosticoError::FactValidation(msg.into())
    }

    /// Constrói um erro de ação de regra.
    pub fn acao(msg: impl Into<String>) -> Self {
        DiagnosticoError::RuleAction(msg.into())
    }

    /// `true` quando o erro foi causado pela entrada do chamador
    /// (mapeado para 4xx na borda HTTP). Os demais são defeitos internos.
    pub fn caused_by_caller(&self) -> bool {
        matches!(self, DiagnosticoError::FactValidation(_))
    }
}

/// Alias de resultado usado em todo o motor.
pub type Result<T> = std::result::Result<T, DiagnosticoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_caller_fault() {
        assert!(DiagnosticoError::validacao("x").caused_by_caller());
    }

    #[test]
    fn cycle_and_action_are_internal() {
        assert!(!DiagnosticoError::CycleLimit { limite: 310 }.caused_by_caller());
        assert!(!DiagnosticoError::acao("x").caused_by_caller());
    }

    #[test]
    fn messages_mention_the_cause() {
        let e = DiagnosticoError::validacao("atributo 'x' desconhecido");
        assert!(e.to_string().contains("atributo 'x' desconhecido"));
        let e = DiagnosticoError::CycleLimit { limite: 310 };
        assert!(e.to_string().contains("310"));
    }
}
