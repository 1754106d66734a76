//! # Pattern Matcher — Casamento de Condições contra a Memória
//!
//! O casador enumera, para uma regra, **todas** as tuplas de fatos
//! vigentes que satisfazem alguma de suas conjunções. É uma leitura
//! pura da memória de trabalho: nada é mutado, nada bloqueia.
//!
//! ## Algoritmo
//!
//! Para cada grupo (conjunção) da regra:
//!
//! 1. varre os fatos do tipo de cada condição, em ordem de id,
//!    guardando os que satisfazem as restrições do atributo;
//! 2. se alguma condição ficou sem candidatos, o grupo não casa;
//! 3. combina os candidatos por produto cartesiano — o domínio não
//!    exige unificação de variáveis entre condições, então cada condição
//!    prende seu fato de forma independente.
//!
//! Grupos em OU são tentados como alternativas independentes; tuplas
//! idênticas vindas de grupos diferentes colapsam numa ativação só
//! (a identidade de uma ativação é regra + tupla presa, nada mais).
//!
//! A filtragem por refração fica com o motor, que conhece o conjunto de
//! chaves já vistas; o casador apenas produz as ativações possíveis.

use std::collections::HashSet;

use crate::core::{StoredFact, WorkingMemory};

use super::agenda::Activation;
use super::condition::Rule;

/// Casador de padrões — sem estado, opera por varredura.
pub struct PatternMatcher;

impl PatternMatcher {
    /// Enumera as ativações de uma regra contra a memória vigente.
    ///
    /// Propaga [`FactValidation`](crate::error::DiagnosticoError) se uma
    /// comparação numérica encontrar valor não-numérico — a execução
    /// falha sem resultado parcial.
    pub fn matches(
        rule_index: usize,
        rule: &Rule,
        wm: &WorkingMemory,
    ) -> crate::error::Result<Vec<Activation>> {
        let mut activations = Vec::new();
        let mut seen_tuples: HashSet<Vec<(u64, u32)>> = HashSet::new();

        for group in &rule.groups {
            // candidatos por condição, na ordem das condições
            let mut candidates: Vec<Vec<&StoredFact>> = Vec::with_capacity(group.len());
            let mut group_matches = true;
            for condition in group {
                let mut matched = Vec::new();
                for stored in wm.facts_of_kind(condition.kind) {
                    if condition.matches(stored)? {
                        matched.push(stored);
                    }
                }
                if matched.is_empty() {
                    group_matches = false;
                    break;
                }
                candidates.push(matched);
            }
            if !group_matches || candidates.is_empty() {
                continue;
            }

            // produto cartesiano dos candidatos (odômetro de índices)
            let mut indices = vec![0usize; candidates.len()];
            loop {
                let tuple: Vec<&StoredFact> = indices
                    .iter()
                    .zip(&candidates)
                    .map(|(&i, c)| c[i])
                    .collect();
                let bindings: Vec<(u64, u32)> =
                    tuple.iter().map(|f| (f.id, f.generation)).collect();
                if seen_tuples.insert(bindings.clone()) {
                    let recency = tuple.iter().map(|f| f.recency).max().unwrap_or(0);
                    activations.push(Activation {
                        rule_index,
                        salience: rule.salience,
                        bindings,
                        recency,
                    });
                }

                // avança o odômetro; termina quando a primeira posição estoura
                let mut pos = candidates.len();
                loop {
                    if pos == 0 {
                        break;
                    }
                    pos -= 1;
                    indices[pos] += 1;
                    if indices[pos] < candidates[pos].len() {
                        break;
                    }
                    indices[pos] = 0;
                    if pos == 0 {
                        pos = usize::MAX;
                        break;
                    }
                }
                if pos == usize::MAX {
                    break;
                }
            }
        }

        Ok(activations)
    }
}
