//! # Módulo Engine — O Motor de Inferência por Encadeamento Progressivo
//!
//! O [`DiagnosticEngine`] executa o ciclo clássico **casar → selecionar
//! → agir** sobre a memória de trabalho até a quiescência: nenhuma
//! ativação pendente, nenhuma conclusão nova a derivar.
//!
//! ## Ciclo de Execução
//!
//! ```text
//! new(base)
//!   ├── semeia fato de controle (acao = "buscar_solucao")
//!   └── semeia acumulador `resultados` vazio
//! declare_input(fatos do chamador)
//!   └── valida tipo, forma dos valores e vocabulário
//! run()
//!   ├── casa todas as regras → agenda
//!   └── enquanto houver ativação vigente:
//!       ├── seleciona a de maior prioridade (salience, recência, ordem)
//!       ├── registra a chave de refração (dispara no máximo uma vez)
//!       ├── executa a ação (acumular / declarar / coletar)
//!       └── recasa apenas as regras que referenciam os tipos mutados
//! ```
//!
//! ## Término
//!
//! A regra terminal (salience −100) retrai o fato de controle e
//! consolida o relatório; depois dela a agenda esvazia e `run` devolve a
//! lista final. Um teto rígido de disparos (múltiplo do tamanho da base)
//! transforma qualquer ciclo imprevisto de regras em
//! [`CycleLimit`](crate::error::DiagnosticoError::CycleLimit) em vez de
//! laço infinito.
//!
//! ## Isolamento
//!
//! Um motor por requisição: a memória de trabalho nasce e morre dentro
//! de `run`, nada é compartilhado entre execuções além da base de regras
//! imutável (`Arc<Ruleset>`).

/// Sub-módulo com condições, predicados, ações e a base de regras.
pub mod condition;

/// Sub-módulo com a agenda e a resolução de conflitos.
pub mod agenda;

/// Sub-módulo com o casador de padrões.
pub mod matcher;

pub use agenda::{Activation, Agenda, RefractionKey};
pub use condition::{Action, Condition, Predicate, Rule, Ruleset};
pub use matcher::PatternMatcher;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::core::{
    Fact, FactId, FactKind, InputFact, ResultRecord, Value, WorkingMemory,
};
use crate::error::DiagnosticoError;

/// Atributo do fato acumulador que guarda a lista de registros.
const ACCUMULATOR_ATTR: &str = "itens";

/// Motor de diagnóstico de uma única requisição.
pub struct DiagnosticEngine {
    ruleset: Arc<Ruleset>,
    wm: WorkingMemory,
    agenda: Agenda,
    /// Chaves de refração já enfileiradas — cada uma dispara no máximo
    /// uma vez, mesmo que fatos alheios mudem no meio da execução.
    seen: HashSet<RefractionKey>,
    /// Id do fato acumulador singleton, semeado na criação.
    accumulator_id: FactId,
    /// Relatório consolidado pela regra terminal.
    report: Option<Vec<ResultRecord>>,
    /// Disparos executados (comparado ao teto da base).
    fired: usize,
}

impl DiagnosticEngine {
    /// Cria um motor com a memória semeada: fato de controle + acumulador.
    pub fn new(ruleset: Arc<Ruleset>) -> Self {
        let mut wm = WorkingMemory::new();
        wm.assert_fact(Fact::new(FactKind::Controle).with("acao", "buscar_solucao"));
        let accumulator_id = wm.assert_fact(
            Fact::new(FactKind::Resultados)
                .with(ACCUMULATOR_ATTR, Value::Registros(Vec::new())),
        );
        Self {
            ruleset,
            wm,
            agenda: Agenda::new(),
            seen: HashSet::new(),
            accumulator_id,
            report: None,
            fired: 0,
        }
    }

    /// Valida e insere os fatos do chamador, na ordem de submissão.
    ///
    /// A ordem só influencia a recência (desempate de agenda), nunca o
    /// conjunto final de conclusões. Atributos fora do vocabulário da
    /// base são rejeitados aqui, antes de qualquer regra rodar.
    pub fn declare_input(&mut self, inputs: &[InputFact]) -> crate::error::Result<()> {
        let vocabulary = self.ruleset.input_vocabulary();
        for input in inputs {
            let fact = input.to_fact()?;
            for atributo in fact.attrs.keys() {
                if !vocabulary.contains(&(fact.kind, atributo.clone())) {
                    return Err(DiagnosticoError::validacao(format!(
                        "atributo '{atributo}' não é interpretável para fatos '{}'",
                        fact.kind.label()
                    )));
                }
            }
            self.wm.assert_fact(fact);
        }
        Ok(())
    }

    /// Executa até a quiescência e devolve o relatório final.
    ///
    /// Qualquer erro (validação durante casamento, teto de disparos,
    /// falha de ação) encerra a execução sem lista parcial.
    pub fn run(mut self) -> crate::error::Result<Vec<ResultRecord>> {
        // descarta o estado "sujo" da semeadura e faz o casamento inicial completo
        self.wm.drain_dirty();
        self.rescan_rules(None)?;

        let limit = self.ruleset.cycle_limit();
        while let Some(activation) = self.agenda.pop_best(&self.wm) {
            self.fired += 1;
            if self.fired > limit {
                return Err(DiagnosticoError::CycleLimit { limite: limit });
            }
            self.fire(&activation)?;
            let dirty = self.wm.drain_dirty();
            if !dirty.is_empty() {
                self.rescan_rules(Some(&dirty))?;
            }
        }

        tracing::debug!(
            disparos = self.fired,
            fatos = self.wm.fact_count(),
            "motor atingiu quiescência"
        );
        Ok(self.report.take().unwrap_or_default())
    }

    /// Recasa regras contra a memória vigente. Com `kinds`, só as regras
    /// que referenciam algum dos tipos mutados; sem, todas.
    fn rescan_rules(&mut self, kinds: Option<&BTreeSet<FactKind>>) -> crate::error::Result<()> {
        for (rule_index, rule) in self.ruleset.rules().iter().enumerate() {
            if let Some(dirty) = kinds {
                if rule.referenced_kinds().is_disjoint(dirty) {
                    continue;
                }
            }
            for activation in PatternMatcher::matches(rule_index, rule, &self.wm)? {
                // refração: cada chave entra na agenda uma única vez
                if self.seen.insert(activation.refraction_key()) {
                    self.agenda.push(activation);
                }
            }
        }
        Ok(())
    }

    /// Executa a ação da regra presa à ativação.
    fn fire(&mut self, activation: &Activation) -> crate::error::Result<()> {
        // clone do Arc para soltar o empréstimo de `self` antes da ação
        let ruleset = Arc::clone(&self.ruleset);
        let rule = &ruleset.rules()[activation.rule_index];
        tracing::debug!(regra = rule.name, salience = rule.salience, "disparando regra");
        match &rule.action {
            Action::Accumulate(record) => self.append_record(record.clone()),
            Action::Declare { causa, recomendacao } => {
                self.wm.assert_fact(
                    Fact::new(FactKind::Diagnostico)
                        .with("causa", *causa)
                        .with("recomendacao", *recomendacao),
                );
                Ok(())
            }
            Action::Collect => self.collect(activation),
        }
    }

    /// Anexa um registro ao acumulador via ler-modificar-substituir.
    fn append_record(&mut self, record: ResultRecord) -> crate::error::Result<()> {
        let stored = self.wm.get(self.accumulator_id).ok_or_else(|| {
            DiagnosticoError::acao("fato acumulador `resultados` não está mais vigente")
        })?;
        let mut records = stored
            .fact
            .attr(ACCUMULATOR_ATTR)
            .and_then(Value::as_records)
            .ok_or_else(|| DiagnosticoError::acao("fato acumulador sem payload de registros"))?
            .to_vec();
        records.push(record);
        self.wm.modify(
            self.accumulator_id,
            [(ACCUMULATOR_ATTR.to_string(), Value::Registros(records))],
        )?;
        Ok(())
    }

    /// Regra terminal: retrai o fato de controle e consolida o relatório.
    ///
    /// Fonte 1: os registros acumulados, na ordem de disparo. Fonte 2:
    /// os fatos `Diagnostico` declarados (encadeamento) ainda vigentes,
    /// em ordem de id, anexados apenas quando a `causa` ainda não
    /// apareceu — uma causa nunca é reportada duas vezes.
    fn collect(&mut self, activation: &Activation) -> crate::error::Result<()> {
        // o primeiro fato preso pela regra terminal é o fato de controle
        let (control_id, _) = *activation.bindings.first().ok_or_else(|| {
            DiagnosticoError::acao("regra terminal sem fato de controle preso")
        })?;
        self.wm.retract(control_id)?;

        let mut report: Vec<ResultRecord> = self
            .wm
            .get(self.accumulator_id)
            .and_then(|s| s.fact.attr(ACCUMULATOR_ATTR))
            .and_then(Value::as_records)
            .map(<[ResultRecord]>::to_vec)
            .unwrap_or_default();

        let mut known_causes: BTreeSet<String> = report
            .iter()
            .filter_map(|r| r.causa.clone())
            .collect();

        let standalone: Vec<ResultRecord> = self
            .wm
            .facts_of_kind(FactKind::Diagnostico)
            .filter_map(|stored| {
                let causa = stored.fact.text_attr("causa")?;
                if known_causes.contains(causa) {
                    return None;
                }
                known_causes.insert(causa.to_string());
                let mut record = ResultRecord::diagnostico().causa(causa);
                record.recomendacao = stored
                    .fact
                    .text_attr("recomendacao")
                    .map(str::to_string);
                record.recomendacao_controle = stored
                    .fact
                    .text_attr("recomendacao_controle")
                    .map(str::to_string);
                record.recomendacao_corretiva = stored
                    .fact
                    .text_attr("recomendacao_corretiva")
                    .map(str::to_string);
                Some(record)
            })
            .collect();
        report.extend(standalone);

        tracing::debug!(registros = report.len(), "relatório consolidado");
        self.report = Some(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordKind;
    use crate::rules;

    fn diagnose(inputs: serde_json::Value) -> crate::error::Result<Vec<ResultRecord>> {
        let ruleset = Arc::new(rules::ruleset());
        let inputs: Vec<InputFact> = serde_json::from_value(inputs).unwrap();
        let mut engine = DiagnosticEngine::new(ruleset);
        engine.declare_input(&inputs)?;
        engine.run()
    }

    // ─── cenários do domínio ───────────────────────────────────

    #[test]
    fn sandy_soil_low_moisture_yields_short_cycle_irrigation() {
        let report = diagnose(serde_json::json!([
            { "tipo": "Condicao", "dados": { "sensor_umidade_solo": 20, "tipo_solo": "arenoso" } }
        ]))
        .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].tipo, RecordKind::Diagnostico);
        assert_eq!(
            report[0].causa.as_deref(),
            Some("baixa_umidade_em_solo_arenoso")
        );
        assert_eq!(
            report[0].recomendacao.as_deref(),
            Some("irrigar_agora_ciclo_curto")
        );
    }

    #[test]
    fn calcium_deficiency_chains_into_ph_correction() {
        let report = diagnose(serde_json::json!([
            { "tipo": "Sintoma", "dados": {
                "local": "folhas_novas",
                "aspecto": "deformadas_ou_retorcidas",
                "ponto_crescimento": "morto"
            } },
            { "tipo": "Condicao", "dados": { "ph_solo": 5.0 } }
        ]))
        .unwrap();

        let calcio = report
            .iter()
            .find(|r| r.causa.as_deref() == Some("deficiencia_de_calcio_(Ca)"))
            .expect("diagnóstico de cálcio declarado deve aparecer");
        assert_eq!(
            calcio.recomendacao.as_deref(),
            Some("Aplicar gesso agrícola ou nitrato de cálcio.")
        );

        let corretiva = report
            .iter()
            .find(|r| r.recomendacao_corretiva.is_some())
            .expect("regra encadeada de pH deve produzir registro corretivo");
        assert!(corretiva.causa.is_none(), "registro corretivo não tem causa");
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn co_infection_outranks_and_oidio_surfaces_once() {
        let report = diagnose(serde_json::json!([
            { "tipo": "Sintoma", "dados": { "observacao": "po_branco_nas_folhas" } },
            { "tipo": "Sintoma", "dados": {
                "observacao_inseto": "pequenos_insetos_verdes_ou_pretos_agrupados"
            } }
        ]))
        .unwrap();

        assert!(report
            .iter()
            .any(|r| r.causa.as_deref() == Some("co_infeccao_severa_(oidio_e_pulgoes)")));
        let oidio: Vec<_> = report
            .iter()
            .filter(|r| r.causa.as_deref() == Some("infeccao_fungica_oidio"))
            .collect();
        assert_eq!(oidio.len(), 1, "oídio encadeado aparece exatamente uma vez");
        // a regra de pulgões exige a substância pegajosa, ausente aqui
        assert!(!report
            .iter()
            .any(|r| r.causa.as_deref() == Some("infestacao_de_pulgoes_(afideos)")));
    }

    #[test]
    fn no_matching_facts_yield_empty_report_not_error() {
        let report = diagnose(serde_json::json!([
            { "tipo": "Condicao", "dados": { "temperatura_ar": 20 } }
        ]))
        .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn non_numeric_reading_fails_validation_without_partial_report() {
        let err = diagnose(serde_json::json!([
            { "tipo": "Condicao", "dados": { "temperatura_ar": "quente" } }
        ]))
        .unwrap_err();
        assert!(err.caused_by_caller());
    }

    #[test]
    fn unknown_attribute_is_rejected_up_front() {
        let err = diagnose(serde_json::json!([
            { "tipo": "Condicao", "dados": { "fase_da_lua": "cheia" } }
        ]))
        .unwrap_err();
        assert!(err.caused_by_caller());
        assert!(err.to_string().contains("fase_da_lua"));
    }

    // ─── propriedades do motor ─────────────────────────────────

    #[test]
    fn repeated_runs_are_deterministic() {
        let inputs = serde_json::json!([
            { "tipo": "Sintoma", "dados": { "observacao": "po_branco_nas_folhas" } },
            { "tipo": "Sintoma", "dados": {
                "observacao_inseto": "pequenos_insetos_verdes_ou_pretos_agrupados"
            } },
            { "tipo": "Condicao", "dados": { "previsao_tempo": "geada_iminente", "temperatura_ar": 2 } },
            { "tipo": "Condicao", "dados": { "ph_solo": 8.0 } }
        ]);
        let first = diagnose(inputs.clone()).unwrap();
        for _ in 0..5 {
            assert_eq!(diagnose(inputs.clone()).unwrap(), first);
        }
    }

    #[test]
    fn higher_salience_conclusions_come_first() {
        // geada sobre planta enfraquecida (salience 5) precede o alerta
        // simples de geada (salience 0) na ordem de acumulação
        let report = diagnose(serde_json::json!([
            { "tipo": "Sintoma", "dados": {
                "observacao_inseto": "pequenos_insetos_verdes_ou_pretos_agrupados"
            } },
            { "tipo": "Condicao", "dados": { "previsao_tempo": "geada_iminente", "temperatura_ar": 2 } }
        ]))
        .unwrap();
        let urgente = report
            .iter()
            .position(|r| {
                r.risco.as_deref()
                    == Some("Risco Critico: Geada em planta enfraquecida por pragas")
            })
            .expect("alerta urgente presente");
        let simples = report
            .iter()
            .position(|r| r.risco.as_deref() == Some("Risco iminente de geada"))
            .expect("alerta simples presente");
        assert!(urgente < simples);
    }

    #[test]
    fn refraction_keeps_single_firing_despite_unrelated_mutations() {
        // o acumulador muda a cada anexo; as regras de Condicao não podem
        // redisparar por causa disso
        let report = diagnose(serde_json::json!([
            { "tipo": "Condicao", "dados": { "sensor_umidade_solo": 20, "tipo_solo": "arenoso" } },
            { "tipo": "Condicao", "dados": { "velocidade_vento": 70 } }
        ]))
        .unwrap();
        let irrigacao: Vec<_> = report
            .iter()
            .filter(|r| r.causa.as_deref() == Some("baixa_umidade_em_solo_arenoso"))
            .collect();
        assert_eq!(irrigacao.len(), 1);
        let vento: Vec<_> = report
            .iter()
            .filter(|r| r.risco.as_deref() == Some("Risco de acamamento (tombamento) pelo vento"))
            .collect();
        assert_eq!(vento.len(), 1);
    }

    // ─── bases sintéticas ──────────────────────────────────────

    #[test]
    fn dedup_law_single_record_per_cause() {
        // causa "x" acumulada diretamente E declarada por encadeamento:
        // o relatório final contém exatamente um registro com essa causa
        let ruleset = Arc::new(Ruleset::new(vec![
            Rule::new(
                "acumula_x",
                vec![Condition::condicao().eq("gatilho", "sim")],
                Action::Accumulate(ResultRecord::diagnostico().causa("x").recomendacao("r1")),
            ),
            Rule::new(
                "declara_x",
                vec![Condition::condicao().eq("gatilho", "sim")],
                Action::Declare {
                    causa: "x",
                    recomendacao: "r2",
                },
            ),
            rules::collection_rule(),
        ]));
        let mut engine = DiagnosticEngine::new(ruleset);
        engine
            .declare_input(&[InputFact {
                tipo: "Condicao".to_string(),
                dados: serde_json::from_value(serde_json::json!({ "gatilho": "sim" })).unwrap(),
            }])
            .unwrap();
        let report = engine.run().unwrap();
        let xs: Vec<_> = report
            .iter()
            .filter(|r| r.causa.as_deref() == Some("x"))
            .collect();
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].recomendacao.as_deref(), Some("r1"), "fonte 1 prevalece");
    }

    #[test]
    fn runaway_chaining_hits_the_cycle_limit() {
        // regra que redispara sobre cada Diagnostico que ela mesma declara
        let ruleset = Arc::new(Ruleset::new(vec![
            Rule::new(
                "realimenta",
                vec![Condition::diagnostico()],
                Action::Declare {
                    causa: "laco",
                    recomendacao: "laco",
                },
            ),
            Rule::new(
                "semente",
                vec![Condition::condicao().eq("gatilho", "sim")],
                Action::Declare {
                    causa: "inicio",
                    recomendacao: "inicio",
                },
            ),
            rules::collection_rule(),
        ]));
        let mut engine = DiagnosticEngine::new(ruleset);
        engine
            .declare_input(&[InputFact {
                tipo: "Condicao".to_string(),
                dados: serde_json::from_value(serde_json::json!({ "gatilho": "sim" })).unwrap(),
            }])
            .unwrap();
        let err = engine.run().unwrap_err();
        assert!(matches!(err, DiagnosticoError::CycleLimit { .. }));
    }

    #[test]
    fn empty_input_reaches_quiescence_with_empty_report() {
        let report = diagnose(serde_json::json!([])).unwrap();
        assert!(report.is_empty());
    }
}
