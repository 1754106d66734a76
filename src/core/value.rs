//! # Value — Valores de Atributos de Fatos
//!
//! Todo atributo de um fato carrega um [`Value`]. O chamador só pode
//! fornecer os três escalares (número, texto, booleano); o quarto
//! variante, [`Value::Registros`], é o payload interno do fato acumulador
//! `resultados` e nunca atravessa a borda de entrada.
//!
//! ## Conversão a partir de JSON
//!
//! A API recebe os valores como `serde_json::Value`. A conversão é
//! explícita e restritiva: arrays, objetos e `null` são rejeitados com
//! [`DiagnosticoError::FactValidation`] antes de qualquer regra rodar.
//!
//! | JSON | Value |
//! |------|-------|
//! | `20`, `5.5` | `Numero` |
//! | `"arenoso"` | `Texto` |
//! | `true` | `Logico` |
//! | `[...]`, `{...}`, `null` | erro de validação |

use super::fact::ResultRecord;
use crate::error::DiagnosticoError;

/// Valor de um atributo de fato.
///
/// Números são sempre `f64` — os sensores do domínio reportam leituras
/// contínuas (umidade, pH, temperatura) e os limiares das regras são
/// fracionários (`7.5`, `5.5`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Leitura numérica (ex: `sensor_umidade_solo = 20`).
    Numero(f64),
    /// Token textual do domínio (ex: `tipo_solo = "arenoso"`).
    Texto(String),
    /// Indicador booleano (ex: `periodo_chuvoso = true`).
    Logico(bool),
    /// Payload do fato acumulador `resultados`. Interno ao motor.
    Registros(Vec<ResultRecord>),
}

impl Value {
    /// Retorna o número contido, se este valor for numérico.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Numero(n) => Some(*n),
            _ => None,
        }
    }

    /// Retorna o texto contido, se este valor for textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Texto(t) => Some(t),
            _ => None,
        }
    }

    /// Retorna os registros acumulados, se este for o payload do acumulador.
    pub fn as_records(&self) -> Option<&[ResultRecord]> {
        match self {
            Value::Registros(r) => Some(r),
            _ => None,
        }
    }

    /// Descrição curta do tipo do valor, para mensagens de erro.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Numero(_) => "número",
            Value::Texto(_) => "texto",
            Value::Logico(_) => "booleano",
            Value::Registros(_) => "registros",
        }
    }

    /// Converte um valor JSON do chamador em [`Value`].
    ///
    /// Só os escalares são aceitos. Qualquer outra forma é rejeitada
    /// com [`DiagnosticoError::FactValidation`] nomeando o atributo.
    pub fn from_json(atributo: &str, valor: &serde_json::Value) -> crate::error::Result<Value> {
        match valor {
            serde_json::Value::Number(n) => {
                let x = n.as_f64().ok_or_else(|| {
                    DiagnosticoError::validacao(format!(
                        "atributo '{atributo}': número fora da faixa representável"
                    ))
                })?;
                Ok(Value::Numero(x))
            }
            serde_json::Value::String(s) => Ok(Value::Texto(s.clone())),
            serde_json::Value::Bool(b) => Ok(Value::Logico(*b)),
            outro => Err(DiagnosticoError::validacao(format!(
                "atributo '{atributo}': valor deve ser número, texto ou booleano (recebido: {outro})"
            ))),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Numero(n)
    }
}

impl From<&str> for Value {
    fn from(t: &str) -> Self {
        Value::Texto(t.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logico(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── from_json ─────────────────────────────────────────────

    #[test]
    fn scalar_conversions() {
        let v = Value::from_json("umidade", &serde_json::json!(20)).unwrap();
        assert_eq!(v, Value::Numero(20.0));
        let v = Value::from_json("tipo_solo", &serde_json::json!("arenoso")).unwrap();
        assert_eq!(v, Value::Texto("arenoso".to_string()));
        let v = Value::from_json("periodo_chuvoso", &serde_json::json!(true)).unwrap();
        assert_eq!(v, Value::Logico(true));
    }

    #[test]
    fn arrays_and_objects_are_rejected() {
        let err = Value::from_json("x", &serde_json::json!([1, 2])).unwrap_err();
        assert!(err.caused_by_caller());
        let err = Value::from_json("x", &serde_json::json!({"a": 1})).unwrap_err();
        assert!(err.caused_by_caller());
        let err = Value::from_json("x", &serde_json::Value::Null).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    // ─── acessores ─────────────────────────────────────────────

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::Numero(5.5).as_number(), Some(5.5));
        assert_eq!(Value::Texto("seco".into()).as_number(), None);
        assert_eq!(Value::Texto("seco".into()).as_text(), Some("seco"));
        assert!(Value::Registros(Vec::new()).as_records().is_some());
    }
}
