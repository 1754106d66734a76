//! # Fact — O Registro Tipado da Memória de Trabalho
//!
//! Um [`Fact`] é a unidade de conhecimento que o motor avalia: um tipo
//! ([`FactKind`]) mais um mapa de atributos → [`Value`]. Os fatos do
//! chamador chegam como [`InputFact`] (JSON) e são convertidos com
//! validação; os demais tipos nascem dentro do próprio motor.
//!
//! ## Tipos de Fato
//!
//! | Kind | Origem | Papel |
//! |------|--------|-------|
//! | `Sintoma` | chamador | observação na planta (folhas, insetos, resíduos) |
//! | `Condicao` | chamador | leitura ambiental ou de solo |
//! | `Diagnostico` | regras (encadeamento) | conclusão intermediária que também vira premissa |
//! | `Alerta` | regras | aviso de risco autônomo |
//! | `Controle` | motor | fato `acao = "buscar_solucao"` que mantém a execução viva |
//! | `Resultados` | motor | acumulador singleton com a lista de [`ResultRecord`] |
//!
//! Os atributos usam os tokens do domínio em snake_case
//! (`sensor_umidade_solo`, `folhas_velhas`, `po_branco_nas_folhas`);
//! eles são dados, não identificadores do programa.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::error::DiagnosticoError;

/// Tipo (variante) de um fato na memória de trabalho.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FactKind {
    /// Observação de sintoma na planta, fornecida pelo chamador.
    Sintoma,
    /// Condição ambiental ou de solo, fornecida pelo chamador.
    Condicao,
    /// Conclusão declarada por regra — premissa para encadeamento.
    Diagnostico,
    /// Aviso de risco declarado por regra.
    Alerta,
    /// Fato de controle do processo (`acao = "buscar_solucao"`).
    Controle,
    /// Acumulador singleton de registros de resultado.
    Resultados,
}

impl FactKind {
    /// Label legível do tipo, para logs e mensagens de erro.
    pub fn label(&self) -> &'static str {
        match self {
            FactKind::Sintoma => "Sintoma",
            FactKind::Condicao => "Condicao",
            FactKind::Diagnostico => "Diagnostico",
            FactKind::Alerta => "Alerta",
            FactKind::Controle => "Controle",
            FactKind::Resultados => "Resultados",
        }
    }
}

/// Fato imutável: tipo + atributos.
///
/// A identidade (id, geração, recência) é atribuída pela memória de
/// trabalho ao armazenar; ver
/// [`WorkingMemory`](super::working_memory::WorkingMemory).
#[derive(Clone, Debug, PartialEq)]
pub struct Fact {
    /// Tipo do fato.
    pub kind: FactKind,
    /// Atributos do fato. `BTreeMap` para iteração determinística.
    pub attrs: BTreeMap<String, Value>,
}

impl Fact {
    /// Cria um fato sem atributos.
    pub fn new(kind: FactKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
        }
    }

    /// Adiciona um atributo (builder).
    ///
    /// ```rust
    /// let fato = Fact::new(FactKind::Condicao)
    ///     .with("sensor_umidade_solo", 20.0)
    ///     .with("tipo_solo", "arenoso");
    /// ```
    pub fn with(mut self, atributo: &str, valor: impl Into<Value>) -> Self {
        self.attrs.insert(atributo.to_string(), valor.into());
        self
    }

    /// Retorna o valor de um atributo, se presente.
    pub fn attr(&self, atributo: &str) -> Option<&Value> {
        self.attrs.get(atributo)
    }

    /// Atalho para o texto de um atributo.
    pub fn text_attr(&self, atributo: &str) -> Option<&str> {
        self.attr(atributo).and_then(Value::as_text)
    }
}

// ─── Registros de resultado ────────────────────────────────────────

/// Tipo de um registro de resultado — conclusão provável ou aviso de risco.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Causa provável com recomendação.
    Diagnostico,
    /// Aviso de risco preventivo.
    Alerta,
}

/// Registro esparso de resultado — a unidade da lista final devolvida
/// ao chamador.
///
/// Campos ausentes não carregam valor e são omitidos da serialização
/// (`skip_serializing_if`), mantendo o JSON de saída limpo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Tipo do registro.
    pub tipo: RecordKind,
    /// Causa provável identificada (tokens internos do motor).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub causa: Option<String>,
    /// Descrição do risco (somente em alertas).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risco: Option<String>,
    /// Recomendação imediata.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recomendacao: Option<String>,
    /// Controle específico de praga.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recomendacao_controle: Option<String>,
    /// Correção específica de solo (regras encadeadas de pH).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recomendacao_corretiva: Option<String>,
}

impl ResultRecord {
    fn empty(tipo: RecordKind) -> Self {
        Self {
            tipo,
            causa: None,
            risco: None,
            recomendacao: None,
            recomendacao_controle: None,
            recomendacao_corretiva: None,
        }
    }

    /// Registro de diagnóstico vazio (builder).
    pub fn diagnostico() -> Self {
        Self::empty(RecordKind::Diagnostico)
    }

    /// Registro de alerta vazio (builder).
    pub fn alerta() -> Self {
        Self::empty(RecordKind::Alerta)
    }

    /// Define a causa provável.
    pub fn causa(mut self, texto: &str) -> Self {
        self.causa = Some(texto.to_string());
        self
    }

    /// Define a descrição de risco.
    pub fn risco(mut self, texto: &str) -> Self {
        self.risco = Some(texto.to_string());
        self
    }

    /// Define a recomendação imediata.
    pub fn recomendacao(mut self, texto: &str) -> Self {
        self.recomendacao = Some(texto.to_string());
        self
    }

    /// Define o controle específico de praga.
    pub fn recomendacao_controle(mut self, texto: &str) -> Self {
        self.recomendacao_controle = Some(texto.to_string());
        self
    }

    /// Define a correção específica de solo.
    pub fn recomendacao_corretiva(mut self, texto: &str) -> Self {
        self.recomendacao_corretiva = Some(texto.to_string());
        self
    }
}

// ─── Fatos de entrada ──────────────────────────────────────────────

/// Fato como chega do chamador pela API: tipo textual + dados JSON.
///
/// Forma aceita no corpo de `POST /diagnosticar`:
///
/// ```json
/// { "tipo": "Condicao", "dados": { "sensor_umidade_solo": 20, "tipo_solo": "arenoso" } }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputFact {
    /// `"Sintoma"` ou `"Condicao"` — os únicos tipos que o chamador declara.
    pub tipo: String,
    /// Atributos do fato como pares nome → valor escalar.
    #[serde(default)]
    pub dados: serde_json::Map<String, serde_json::Value>,
}

impl InputFact {
    /// Converte em [`Fact`], validando tipo e forma dos valores.
    ///
    /// A validação de vocabulário (atributo conhecido pela base de
    /// regras) acontece depois, no motor, que conhece a base carregada.
    pub fn to_fact(&self) -> crate::error::Result<Fact> {
        let kind = match self.tipo.as_str() {
            "Sintoma" => FactKind::Sintoma,
            "Condicao" => FactKind::Condicao,
            outro => {
                return Err(DiagnosticoError::validacao(format!(
                    "tipo de fato desconhecido: '{outro}' (esperado 'Sintoma' ou 'Condicao')"
                )))
            }
        };
        let mut fact = Fact::new(kind);
        for (atributo, valor) in &self.dados {
            fact.attrs
                .insert(atributo.clone(), Value::from_json(atributo, valor)?);
        }
        Ok(fact)
    }
}
