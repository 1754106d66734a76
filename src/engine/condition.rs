//! # Condições, Ações e Regras
//!
//! Uma [`Rule`] é inteiramente **dados**: condições, prioridade
//! (salience) e ação ficam em estruturas fechadas, sem closures. Isso
//! mantém a base de regras inspecionável e testável em isolamento — o
//! conjunto de predicados é um enum pequeno que carrega seus operandos,
//! e as ações são três variantes que o laço de execução interpreta.
//!
//! ## Forma de uma Regra
//!
//! ```rust
//! Rule::new(
//!     "regra_irrigacao_solo_arenoso",
//!     vec![
//!         Condition::condicao().lt("sensor_umidade_solo", 30.0),
//!         Condition::condicao().eq("tipo_solo", "arenoso"),
//!     ],
//!     Action::Accumulate(
//!         ResultRecord::diagnostico()
//!             .causa("baixa_umidade_em_solo_arenoso")
//!             .recomendacao("irrigar_agora_ciclo_curto"),
//!     ),
//! )
//! ```
//!
//! Alternativas em OU (a regra casa se **qualquer** conjunção casar)
//! entram como grupos adicionais via [`Rule::or`]. Salience diferente do
//! padrão entra via [`Rule::with_salience`].

use std::collections::BTreeSet;

use crate::core::{FactKind, ResultRecord, StoredFact, Value};
use crate::error::DiagnosticoError;

/// Predicado sobre o valor de um atributo, com operandos como dados.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Igualdade literal com o valor dado.
    Equals(Value),
    /// Estritamente menor que o limiar. Exige valor numérico.
    LessThan(f64),
    /// Estritamente maior que o limiar. Exige valor numérico.
    GreaterThan(f64),
    /// Intervalo aberto `min < x < max`. Exige valor numérico.
    Between {
        /// Limite inferior, exclusivo.
        min: f64,
        /// Limite superior, exclusivo.
        max: f64,
    },
}

impl Predicate {
    /// Avalia o predicado contra o valor de um atributo.
    ///
    /// Predicados numéricos sobre valores não-numéricos são um erro de
    /// validação do chamador (ex: `temperatura_ar = "quente"` contra
    /// `> 35`), não um simples não-casamento — a execução inteira falha
    /// sem lista parcial de resultados.
    pub fn eval(&self, atributo: &str, valor: &Value) -> crate::error::Result<bool> {
        match self {
            Predicate::Equals(esperado) => Ok(esperado == valor),
            Predicate::LessThan(limiar) => {
                Ok(Self::require_number(atributo, valor)? < *limiar)
            }
            Predicate::GreaterThan(limiar) => {
                Ok(Self::require_number(atributo, valor)? > *limiar)
            }
            Predicate::Between { min, max } => {
                let x = Self::require_number(atributo, valor)?;
                Ok(x > *min && x < *max)
            }
        }
    }

    fn require_number(atributo: &str, valor: &Value) -> crate::error::Result<f64> {
        valor.as_number().ok_or_else(|| {
            DiagnosticoError::validacao(format!(
                "atributo '{atributo}': comparação numérica sobre valor {}",
                valor.type_label()
            ))
        })
    }
}

/// Condição sobre **um** fato: um tipo mais restrições por atributo.
///
/// Uma lista de restrições vazia casa qualquer fato do tipo (curinga).
/// Atributo referenciado mas ausente no fato é um não-casamento, nunca
/// um erro.
#[derive(Clone, Debug)]
pub struct Condition {
    /// Tipo de fato exigido.
    pub kind: FactKind,
    /// Restrições atributo → predicado, todas obrigatórias (conjunção).
    pub constraints: Vec<(&'static str, Predicate)>,
}

impl Condition {
    /// Condição curinga sobre um tipo de fato.
    pub fn on(kind: FactKind) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
        }
    }

    /// Condição sobre um `Sintoma`.
    pub fn sintoma() -> Self {
        Self::on(FactKind::Sintoma)
    }

    /// Condição sobre uma `Condicao`.
    pub fn condicao() -> Self {
        Self::on(FactKind::Condicao)
    }

    /// Condição sobre um `Diagnostico` declarado (encadeamento).
    pub fn diagnostico() -> Self {
        Self::on(FactKind::Diagnostico)
    }

    /// Condição sobre o fato de controle.
    pub fn controle() -> Self {
        Self::on(FactKind::Controle)
    }

    /// Condição sobre o fato acumulador.
    pub fn resultados() -> Self {
        Self::on(FactKind::Resultados)
    }

    /// Restringe um atributo por igualdade literal.
    pub fn eq(mut self, atributo: &'static str, valor: impl Into<Value>) -> Self {
        self.constraints.push((atributo, Predicate::Equals(valor.into())));
        self
    }

    /// Restringe um atributo a `< limiar`.
    pub fn lt(mut self, atributo: &'static str, limiar: f64) -> Self {
        self.constraints.push((atributo, Predicate::LessThan(limiar)));
        self
    }

    /// Restringe um atributo a `> limiar`.
    pub fn gt(mut self, atributo: &'static str, limiar: f64) -> Self {
        self.constraints.push((atributo, Predicate::GreaterThan(limiar)));
        self
    }

    /// Restringe um atributo ao intervalo aberto `min < x < max`.
    pub fn between(mut self, atributo: &'static str, min: f64, max: f64) -> Self {
        self.constraints.push((atributo, Predicate::Between { min, max }));
        self
    }

    /// `true` se o fato satisfaz todas as restrições desta condição.
    pub fn matches(&self, stored: &StoredFact) -> crate::error::Result<bool> {
        if stored.fact.kind != self.kind {
            return Ok(false);
        }
        for (atributo, predicado) in &self.constraints {
            match stored.fact.attr(atributo) {
                Some(valor) => {
                    if !predicado.eval(atributo, valor)? {
                        return Ok(false);
                    }
                }
                // atributo ausente: não casa, sem erro
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

/// Ação disparada quando uma regra casa. Conjunto fechado interpretado
/// pelo laço de execução.
#[derive(Clone, Debug)]
pub enum Action {
    /// Anexa um registro à lista do fato acumulador
    /// (ler-modificar-substituir sobre o singleton `resultados`).
    Accumulate(ResultRecord),
    /// Declara um fato `Diagnostico` autônomo, visível como premissa
    /// para regras posteriores (encadeamento).
    Declare {
        /// Causa concluída (token interno).
        causa: &'static str,
        /// Recomendação associada.
        recomendacao: &'static str,
    },
    /// Regra terminal: retrai o fato de controle e consolida o relatório
    /// final a partir das duas fontes de resultado.
    Collect,
}

/// Regra de produção: nome, prioridade, condições em FND e ação.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Nome da regra, para logs e rastreio.
    pub name: &'static str,
    /// Prioridade de disparo. Maior dispara antes. Padrão 0.
    pub salience: i32,
    /// Grupos de condições — alternativas em OU, cada grupo uma conjunção.
    pub groups: Vec<Vec<Condition>>,
    /// Ação executada a cada disparo.
    pub action: Action,
}

impl Rule {
    /// Cria uma regra com uma única conjunção e salience 0.
    pub fn new(name: &'static str, conditions: Vec<Condition>, action: Action) -> Self {
        Self {
            name,
            salience: 0,
            groups: vec![conditions],
            action,
        }
    }

    /// Adiciona uma conjunção alternativa (OU lógico).
    pub fn or(mut self, alternative: Vec<Condition>) -> Self {
        self.groups.push(alternative);
        self
    }

    /// Define a prioridade de disparo.
    pub fn with_salience(mut self, salience: i32) -> Self {
        self.salience = salience;
        self
    }

    /// Tipos de fato referenciados por qualquer condição da regra.
    /// Usado pelo laço para recasar só as regras afetadas por uma mutação.
    pub fn referenced_kinds(&self) -> BTreeSet<FactKind> {
        self.groups
            .iter()
            .flatten()
            .map(|c| c.kind)
            .collect()
    }
}

/// A base de regras carregada — tabela fixa construída uma vez na
/// inicialização e compartilhada entre requisições via `Arc`.
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    /// Monta a base a partir das regras, na ordem de declaração
    /// (a ordem é o desempate final da agenda).
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// As regras, na ordem de declaração.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Número de regras.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` se a base está vazia.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Teto de disparos por execução: um múltiplo pequeno do tamanho da
    /// base. Exceder o teto encerra a execução com erro em vez de laço
    /// infinito.
    pub fn cycle_limit(&self) -> usize {
        self.rules.len() * 10
    }

    /// Vocabulário de entrada: pares (tipo, atributo) que alguma condição
    /// referencia sobre fatos do chamador (`Sintoma`/`Condicao`).
    ///
    /// Atributos fora deste conjunto não podem ser interpretados por
    /// nenhuma regra e são rejeitados na validação de entrada.
    pub fn input_vocabulary(&self) -> BTreeSet<(FactKind, String)> {
        self.rules
            .iter()
            .flat_map(|r| r.groups.iter().flatten())
            .filter(|c| matches!(c.kind, FactKind::Sintoma | FactKind::Condicao))
            .flat_map(|c| {
                c.constraints
                    .iter()
                    .map(move |(atributo, _)| (c.kind, (*atributo).to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fact, WorkingMemory};

    fn stored(fact: Fact) -> StoredFact {
        let mut wm = WorkingMemory::new();
        let id = wm.assert_fact(fact);
        wm.get(id).unwrap().clone()
    }

    // ─── Predicate::eval ───────────────────────────────────────

    #[test]
    fn equality_compares_literally() {
        let p = Predicate::Equals(Value::from("arenoso"));
        assert!(p.eval("tipo_solo", &Value::from("arenoso")).unwrap());
        assert!(!p.eval("tipo_solo", &Value::from("argiloso")).unwrap());
    }

    #[test]
    fn equality_with_mismatched_type_is_a_non_match() {
        let p = Predicate::Equals(Value::from("seco"));
        assert!(!p.eval("solo_umido", &Value::Numero(3.0)).unwrap());
    }

    #[test]
    fn numeric_predicates_use_strict_ordering() {
        assert!(Predicate::LessThan(30.0)
            .eval("u", &Value::Numero(29.9))
            .unwrap());
        assert!(!Predicate::LessThan(30.0)
            .eval("u", &Value::Numero(30.0))
            .unwrap());
        assert!(Predicate::GreaterThan(7.5)
            .eval("ph", &Value::Numero(7.6))
            .unwrap());
        assert!(!Predicate::GreaterThan(7.5)
            .eval("ph", &Value::Numero(7.5))
            .unwrap());
    }

    #[test]
    fn between_is_an_open_range() {
        let p = Predicate::Between { min: 15.0, max: 25.0 };
        assert!(p.eval("t", &Value::Numero(20.0)).unwrap());
        assert!(!p.eval("t", &Value::Numero(15.0)).unwrap());
        assert!(!p.eval("t", &Value::Numero(25.0)).unwrap());
    }

    #[test]
    fn numeric_predicate_over_text_is_validation_error() {
        let err = Predicate::GreaterThan(35.0)
            .eval("temperatura_ar", &Value::from("quente"))
            .unwrap_err();
        assert!(err.caused_by_caller());
        assert!(err.to_string().contains("temperatura_ar"));
    }

    // ─── Condition::matches ────────────────────────────────────

    #[test]
    fn all_constraints_must_hold() {
        let cond = Condition::condicao()
            .lt("sensor_umidade_solo", 30.0)
            .eq("tipo_solo", "arenoso");
        let ok = stored(
            Fact::new(FactKind::Condicao)
                .with("sensor_umidade_solo", 20.0)
                .with("tipo_solo", "arenoso"),
        );
        assert!(cond.matches(&ok).unwrap());
        let wrong_soil = stored(
            Fact::new(FactKind::Condicao)
                .with("sensor_umidade_solo", 20.0)
                .with("tipo_solo", "argiloso"),
        );
        assert!(!cond.matches(&wrong_soil).unwrap());
    }

    #[test]
    fn missing_attribute_is_a_non_match() {
        let cond = Condition::condicao().eq("tipo_solo", "arenoso");
        let sem_solo = stored(Fact::new(FactKind::Condicao).with("ph_solo", 6.0));
        assert!(!cond.matches(&sem_solo).unwrap());
    }

    #[test]
    fn kind_mismatch_never_matches() {
        let cond = Condition::sintoma();
        let condicao = stored(Fact::new(FactKind::Condicao));
        assert!(!cond.matches(&condicao).unwrap());
    }

    #[test]
    fn wildcard_matches_any_fact_of_the_kind() {
        let cond = Condition::resultados();
        let acc = stored(Fact::new(FactKind::Resultados).with("itens", 0.0));
        assert!(cond.matches(&acc).unwrap());
    }

    // ─── Rule / Ruleset ────────────────────────────────────────

    #[test]
    fn referenced_kinds_cover_all_groups() {
        let rule = Rule::new(
            "r",
            vec![Condition::diagnostico(), Condition::condicao().lt("ph_solo", 5.5)],
            Action::Collect,
        )
        .or(vec![Condition::sintoma()]);
        let kinds = rule.referenced_kinds();
        assert!(kinds.contains(&FactKind::Diagnostico));
        assert!(kinds.contains(&FactKind::Condicao));
        assert!(kinds.contains(&FactKind::Sintoma));
    }

    #[test]
    fn vocabulary_only_covers_caller_kinds() {
        let rs = Ruleset::new(vec![Rule::new(
            "r",
            vec![
                Condition::condicao().lt("ph_solo", 5.5),
                Condition::diagnostico().eq("causa", "x"),
            ],
            Action::Collect,
        )]);
        let vocab = rs.input_vocabulary();
        assert!(vocab.contains(&(FactKind::Condicao, "ph_solo".to_string())));
        assert!(!vocab.iter().any(|(k, _)| *k == FactKind::Diagnostico));
    }
}
