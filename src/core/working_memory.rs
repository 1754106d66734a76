//! # WorkingMemory — A Memória de Trabalho Versionada
//!
//! A [`WorkingMemory`] é o conjunto de fatos vigentes de **uma**
//! execução do motor. Ela nasce vazia a cada requisição, recebe os fatos
//! do chamador, é mutada exclusivamente pelo laço de execução e morre
//! quando a lista de resultados é extraída — nada sobrevive entre
//! execuções.
//!
//! ## Identidade e Versão
//!
//! - Cada fato recebe um [`FactId`] sequencial, nunca reutilizado.
//! - "Modificar" um fato cria uma **nova geração** sob o mesmo id; a
//!   geração anterior deixa de existir e qualquer ativação presa a ela é
//!   detectada como obsoleta por divergência de geração, não por
//!   referência pendente.
//! - Cada assert/modify recebe um carimbo de **recência** de um relógio
//!   monotônico, usado pela agenda como desempate.
//!
//! ## Sinalização para o Casador
//!
//! Toda mutação registra o [`FactKind`] tocado em um conjunto "sujo".
//! O laço de execução drena esse conjunto após cada disparo e
//! recasa apenas as regras que referenciam os tipos alterados.
//!
//! ## Determinismo
//!
//! Os fatos ficam em um `BTreeMap` e toda varredura sai em ordem de id,
//! então execuções repetidas sobre a mesma entrada produzem exatamente
//! as mesmas ativações na mesma ordem.

use std::collections::{BTreeMap, BTreeSet};

use super::fact::{Fact, FactKind};
use crate::error::DiagnosticoError;

/// Identificador único de um fato dentro de uma execução.
pub type FactId = u64;

/// Número de geração de um fato — incrementa a cada `modify`.
pub type Generation = u32;

/// Fato com a identidade atribuída pela memória de trabalho.
#[derive(Clone, Debug)]
pub struct StoredFact {
    /// Identificador único na execução.
    pub id: FactId,
    /// Geração vigente (0 na criação).
    pub generation: Generation,
    /// Carimbo de recência da última mutação (assert ou modify).
    pub recency: u64,
    /// O fato em si.
    pub fact: Fact,
}

/// Memória de trabalho de uma execução do motor.
pub struct WorkingMemory {
    /// Fatos vigentes, em ordem de id.
    facts: BTreeMap<FactId, StoredFact>,
    /// Próximo id a atribuir.
    next_id: FactId,
    /// Relógio monotônico de recência.
    clock: u64,
    /// Tipos tocados desde o último [`drain_dirty`](Self::drain_dirty).
    dirty: BTreeSet<FactKind>,
}

impl WorkingMemory {
    /// Cria uma memória de trabalho vazia.
    pub fn new() -> Self {
        Self {
            facts: BTreeMap::new(),
            next_id: 0,
            clock: 0,
            dirty: BTreeSet::new(),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Insere um fato e retorna o id atribuído.
    pub fn assert_fact(&mut self, fact: Fact) -> FactId {
        let id = self.next_id;
        self.next_id += 1;
        let recency = self.tick();
        tracing::trace!(id, kind = fact.kind.label(), "memória: fato inserido");
        self.dirty.insert(fact.kind);
        self.facts.insert(
            id,
            StoredFact {
                id,
                generation: 0,
                recency,
                fact,
            },
        );
        id
    }

    /// Substitui atributos de um fato, produzindo uma **nova geração**
    /// sob o mesmo id. Retorna a geração resultante.
    ///
    /// Ativações presas à geração anterior ficam obsoletas e não
    /// disparam mais, mesmo que já estivessem na agenda.
    pub fn modify(
        &mut self,
        id: FactId,
        updates: impl IntoIterator<Item = (String, super::value::Value)>,
    ) -> crate::error::Result<Generation> {
        let recency = self.tick();
        let stored = self.facts.get_mut(&id).ok_or_else(|| {
            DiagnosticoError::acao(format!("modify: fato {id} não existe ou já foi retratado"))
        })?;
        for (atributo, valor) in updates {
            stored.fact.attrs.insert(atributo, valor);
        }
        stored.generation += 1;
        stored.recency = recency;
        tracing::trace!(
            id,
            generation = stored.generation,
            kind = stored.fact.kind.label(),
            "memória: fato modificado"
        );
        self.dirty.insert(stored.fact.kind);
        Ok(stored.generation)
    }

    /// Remove um fato da memória.
    pub fn retract(&mut self, id: FactId) -> crate::error::Result<()> {
        match self.facts.remove(&id) {
            Some(stored) => {
                tracing::trace!(id, kind = stored.fact.kind.label(), "memória: fato retratado");
                self.dirty.insert(stored.fact.kind);
                Ok(())
            }
            None => Err(DiagnosticoError::acao(format!(
                "retract: fato {id} não existe ou já foi retratado"
            ))),
        }
    }

    /// Retorna o fato vigente sob um id.
    pub fn get(&self, id: FactId) -> Option<&StoredFact> {
        self.facts.get(&id)
    }

    /// `true` se o fato ainda existe **na geração dada** — o teste de
    /// obsolescência usado pela agenda antes de disparar.
    pub fn is_current(&self, id: FactId, generation: Generation) -> bool {
        self.facts
            .get(&id)
            .map(|f| f.generation == generation)
            .unwrap_or(false)
    }

    /// Fatos vigentes de um tipo, em ordem de id.
    pub fn facts_of_kind(&self, kind: FactKind) -> impl Iterator<Item = &StoredFact> {
        self.facts.values().filter(move |f| f.fact.kind == kind)
    }

    /// Todos os fatos vigentes, em ordem de id.
    pub fn all(&self) -> impl Iterator<Item = &StoredFact> {
        self.facts.values()
    }

    /// Drena o conjunto de tipos tocados desde a última chamada.
    pub fn drain_dirty(&mut self) -> BTreeSet<FactKind> {
        std::mem::take(&mut self.dirty)
    }

    /// Número de fatos vigentes.
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }
}

impl Default for WorkingMemory {
    fn default() -> Self {
        Self::new()
    }
}
