//! # Módulo Rules — A Base de Conhecimento Agrícola
//!
//! Tabela fixa de 30 regras de produção, agrupadas por categoria do
//! domínio, mais a regra terminal de coleta. A base é montada **uma vez**
//! na inicialização e compartilhada entre requisições via `Arc` — as
//! regras são dados imutáveis, não código.
//!
//! | Grupo | Módulo | Regras |
//! |-------|--------|--------|
//! | Gestão hídrica | [`hidrica`] | irrigação por solo, estresse hídrico/térmico, asfixia, pH |
//! | Diagnóstico nutricional | [`nutricional`] | deficiências de N, P, K, Mg, Fe, Ca, S |
//! | Doenças e pragas | [`pragas`] | oídio, pulgões, lagartas, ácaro, co-ocorrências urgentes |
//! | Alertas ambientais | [`ambiental`] | escaldadura, geada, vento, míldio, frio, floração |
//!
//! ## Ordem de Declaração
//!
//! A ordem das regras dentro da base é significativa: ela é o desempate
//! final da agenda entre ativações de mesma salience e recência. Os
//! grupos entram na ordem acima e a regra de coleta entra por último.
//!
//! ## Salience
//!
//! Quase todas as regras usam a salience padrão 0. As exceções:
//!
//! - `+5` nas três regras de co-ocorrência perigosa (co-infecção,
//!   geada sobre planta enfraquecida, infecção dupla raiz/folha), para
//!   que o quadro combinado seja reportado antes das causas isoladas;
//! - `-100` na regra de coleta, que só dispara quando todas as outras
//!   possibilidades se esgotaram.

/// Regras de gestão hídrica e de pH do solo.
pub mod hidrica;

/// Regras de deficiência nutricional por leitura foliar.
pub mod nutricional;

/// Regras de doenças, pragas e suas co-ocorrências.
pub mod pragas;

/// Regras de alertas ambientais e preventivos.
pub mod ambiental;

use crate::engine::{Action, Condition, Rule, Ruleset};

/// Monta a base de conhecimento completa, na ordem de declaração.
pub fn ruleset() -> Ruleset {
    let mut rules = Vec::with_capacity(31);
    rules.extend(hidrica::rules());
    rules.extend(nutricional::rules());
    rules.extend(pragas::rules());
    rules.extend(ambiental::rules());
    rules.push(collection_rule());
    Ruleset::new(rules)
}

/// Regra terminal de coleta: com o fato de controle e o acumulador
/// presentes, retrai o controle (encerrando a execução) e consolida o
/// relatório final. Salience −100 garante que ela perde para qualquer
/// outra ativação pendente.
pub fn collection_rule() -> Rule {
    Rule::new(
        "coletar_resultados",
        vec![
            Condition::controle().eq("acao", "buscar_solucao"),
            Condition::resultados(),
        ],
        Action::Collect,
    )
    .with_salience(-100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FactKind;

    // ─── forma da base ─────────────────────────────────────────

    #[test]
    fn base_has_thirty_domain_rules_plus_collection() {
        let rs = ruleset();
        assert_eq!(rs.len(), 31);
        assert_eq!(rs.rules().last().unwrap().name, "coletar_resultados");
    }

    #[test]
    fn rule_names_are_unique() {
        let rs = ruleset();
        let mut names: Vec<_> = rs.rules().iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rs.len());
    }

    #[test]
    fn exactly_three_urgent_rules_and_one_terminal() {
        let rs = ruleset();
        let urgentes: Vec<_> = rs
            .rules()
            .iter()
            .filter(|r| r.salience == 5)
            .map(|r| r.name)
            .collect();
        assert_eq!(urgentes.len(), 3);
        assert!(urgentes.contains(&"regra_co_infeccao_oidio_pulgoes"));
        assert!(urgentes.contains(&"alerta_geada_em_planta_enfraquecida"));
        assert!(urgentes.contains(&"alerta_risco_infeccao_dupla"));
        assert_eq!(
            rs.rules().iter().filter(|r| r.salience == -100).count(),
            1
        );
    }

    #[test]
    fn ph_correction_rule_is_the_only_disjunction() {
        let rs = ruleset();
        let disjunctive: Vec<_> = rs
            .rules()
            .iter()
            .filter(|r| r.groups.len() > 1)
            .map(|r| r.name)
            .collect();
        assert_eq!(disjunctive, vec!["regra_corrigir_ph_para_ca_mg"]);
    }

    #[test]
    fn vocabulary_covers_the_sensor_attributes() {
        let vocab = ruleset().input_vocabulary();
        for (kind, atributo) in [
            (FactKind::Condicao, "sensor_umidade_solo"),
            (FactKind::Condicao, "tipo_solo"),
            (FactKind::Condicao, "ph_solo"),
            (FactKind::Condicao, "temperatura_ar"),
            (FactKind::Condicao, "velocidade_vento"),
            (FactKind::Sintoma, "local"),
            (FactKind::Sintoma, "observacao"),
            (FactKind::Sintoma, "observacao_inseto"),
        ] {
            assert!(
                vocab.contains(&(kind, atributo.to_string())),
                "vocabulário deve conter ({}, {atributo})",
                kind.label()
            );
        }
    }

    #[test]
    fn chaining_rules_declare_instead_of_accumulating() {
        let rs = ruleset();
        let declared: Vec<_> = rs
            .rules()
            .iter()
            .filter(|r| matches!(r.action, Action::Declare { .. }))
            .map(|r| r.name)
            .collect();
        assert_eq!(
            declared,
            vec![
                "regra_deficiencia_magnesio",
                "regra_deficiencia_calcio",
                "regra_oidio"
            ]
        );
    }
}
