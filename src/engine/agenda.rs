//! # Agenda — Resolução de Conflitos entre Ativações
//!
//! Uma [`Activation`] é uma regra presa a uma tupla exata de versões de
//! fatos que satisfaz suas condições. A [`Agenda`] guarda as ativações
//! pendentes e decide **qual dispara primeiro** quando várias competem.
//!
//! ## Ordem de Disparo
//!
//! 1. **Salience** maior primeiro (`+5` para co-ocorrências urgentes,
//!    `-100` para a regra terminal de coleta);
//! 2. **Recência** maior primeiro — a ativação cujos fatos presos foram
//!    criados/modificados por último;
//! 3. **Ordem de declaração** da regra na base (política determinística
//!    escolhida para o empate de salience igual, documentada em DESIGN.md);
//! 4. Ids da tupla presa, como desempate total final.
//!
//! Com isso a seleção é uma ordem total: execuções repetidas sobre a
//! mesma entrada disparam exatamente a mesma sequência.
//!
//! ## Refração e Obsolescência
//!
//! A agenda nunca recebe a mesma chave de refração duas vezes (o motor
//! filtra pelo conjunto de chaves já vistas), e ativações cujos fatos
//! presos mudaram de geração são descartadas na seleção, não disparadas.

use crate::core::{FactId, Generation, WorkingMemory};

/// Chave de refração: índice da regra + tupla exata (id, geração).
///
/// Duas ativações são a mesma se e somente se regra e tupla presa
/// coincidem; um disparo por chave, nunca mais.
pub type RefractionKey = (usize, Vec<(FactId, Generation)>);

/// Uma regra presa a uma tupla de fatos que a satisfaz, pronta para
/// disputar o disparo.
#[derive(Clone, Debug)]
pub struct Activation {
    /// Índice da regra na base (ordem de declaração).
    pub rule_index: usize,
    /// Salience da regra, copiada para a ordenação.
    pub salience: i32,
    /// Tupla presa: (id, geração) de cada fato, na ordem das condições.
    pub bindings: Vec<(FactId, Generation)>,
    /// Maior carimbo de recência entre os fatos presos.
    pub recency: u64,
}

impl Activation {
    /// Chave de refração desta ativação.
    pub fn refraction_key(&self) -> RefractionKey {
        (self.rule_index, self.bindings.clone())
    }

    /// `true` se todos os fatos presos seguem vigentes na geração presa.
    pub fn is_current(&self, wm: &WorkingMemory) -> bool {
        self.bindings
            .iter()
            .all(|(id, generation)| wm.is_current(*id, *generation))
    }

    /// `true` se esta ativação dispara antes da outra.
    fn beats(&self, other: &Activation) -> bool {
        (
            self.salience,
            self.recency,
            std::cmp::Reverse(self.rule_index),
            self.bindings.clone(),
        ) > (
            other.salience,
            other.recency,
            std::cmp::Reverse(other.rule_index),
            other.bindings.clone(),
        )
    }
}

/// Coleção ordenada de ativações pendentes.
pub struct Agenda {
    pending: Vec<Activation>,
}

impl Agenda {
    /// Cria uma agenda vazia.
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Enfileira uma ativação fresca.
    pub fn push(&mut self, activation: Activation) {
        self.pending.push(activation);
    }

    /// Remove e retorna a ativação de maior prioridade ainda vigente.
    ///
    /// Ativações obsoletas (geração presa divergente) são descartadas
    /// aqui — elas não disparam mesmo que já estivessem enfileiradas.
    pub fn pop_best(&mut self, wm: &WorkingMemory) -> Option<Activation> {
        self.pending.retain(|a| a.is_current(wm));
        let mut best: Option<usize> = None;
        for (i, activation) in self.pending.iter().enumerate() {
            match best {
                None => best = Some(i),
                Some(j) => {
                    if activation.beats(&self.pending[j]) {
                        best = Some(i);
                    }
                }
            }
        }
        best.map(|i| self.pending.swap_remove(i))
    }

    /// Número de ativações pendentes (inclui possíveis obsoletas).
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `true` se não há ativações pendentes.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for Agenda {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fact, FactKind};

    fn activation(rule_index: usize, salience: i32, recency: u64) -> Activation {
        Activation {
            rule_index,
            salience,
            bindings: vec![(0, 0)],
            recency,
        }
    }

    fn wm_with_one_fact() -> WorkingMemory {
        let mut wm = WorkingMemory::new();
        wm.assert_fact(Fact::new(FactKind::Condicao));
        wm
    }

    // ─── ordenação ─────────────────────────────────────────────

    #[test]
    fn higher_salience_fires_first() {
        let wm = wm_with_one_fact();
        let mut agenda = Agenda::new();
        agenda.push(activation(0, 0, 9));
        agenda.push(activation(1, 5, 1));
        assert_eq!(agenda.pop_best(&wm).unwrap().rule_index, 1);
    }

    #[test]
    fn recency_breaks_salience_ties() {
        let wm = wm_with_one_fact();
        let mut agenda = Agenda::new();
        agenda.push(activation(0, 0, 1));
        agenda.push(activation(1, 0, 2));
        assert_eq!(agenda.pop_best(&wm).unwrap().rule_index, 1);
    }

    #[test]
    fn declaration_order_breaks_recency_ties() {
        let wm = wm_with_one_fact();
        let mut agenda = Agenda::new();
        agenda.push(activation(3, 0, 7));
        agenda.push(activation(1, 0, 7));
        assert_eq!(agenda.pop_best(&wm).unwrap().rule_index, 1);
    }

    #[test]
    fn terminal_rule_salience_fires_last() {
        let wm = wm_with_one_fact();
        let mut agenda = Agenda::new();
        agenda.push(activation(30, -100, 1));
        agenda.push(activation(5, 0, 1));
        assert_eq!(agenda.pop_best(&wm).unwrap().rule_index, 5);
        assert_eq!(agenda.pop_best(&wm).unwrap().rule_index, 30);
        assert!(agenda.pop_best(&wm).is_none());
    }

    // ─── obsolescência ─────────────────────────────────────────

    #[test]
    fn stale_bindings_are_discarded_not_fired() {
        let mut wm = WorkingMemory::new();
        let id = wm.assert_fact(Fact::new(FactKind::Condicao).with("solo_umido", "seco"));
        let mut agenda = Agenda::new();
        agenda.push(Activation {
            rule_index: 0,
            salience: 0,
            bindings: vec![(id, 0)],
            recency: 1,
        });
        wm.modify(id, [("solo_umido".to_string(), "umido".into())])
            .unwrap();
        assert!(agenda.pop_best(&wm).is_none(), "geração presa divergiu");
        assert!(agenda.is_empty());
    }

    #[test]
    fn retracted_bindings_are_discarded() {
        let mut wm = WorkingMemory::new();
        let id = wm.assert_fact(Fact::new(FactKind::Controle));
        let mut agenda = Agenda::new();
        agenda.push(Activation {
            rule_index: 0,
            salience: 0,
            bindings: vec![(id, 0)],
            recency: 1,
        });
        wm.retract(id).unwrap();
        assert!(agenda.pop_best(&wm).is_none());
    }

    // ─── refração ──────────────────────────────────────────────

    #[test]
    fn refraction_key_distinguishes_generations() {
        let a = activation(0, 0, 1);
        let mut b = activation(0, 0, 1);
        assert_eq!(a.refraction_key(), b.refraction_key());
        b.bindings = vec![(0, 1)];
        assert_ne!(a.refraction_key(), b.refraction_key());
    }
}
