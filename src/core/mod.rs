//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos fundamentais** do sistema especialista:
//!
//! - [`Value`] — valor de um atributo de fato (número, texto, booleano)
//!   mais o payload interno do acumulador de resultados
//! - [`Fact`] / [`FactKind`] — o registro tipado que as regras avaliam
//! - [`ResultRecord`] — registro esparso da lista final de resultados
//! - [`InputFact`] — fato como chega do chamador pela API JSON
//! - [`WorkingMemory`] — o conjunto versionado de fatos de uma execução
//!
//! O motor de inferência ([`crate::engine`]) opera exclusivamente sobre
//! estes tipos; a base de regras ([`crate::rules`]) os produz e consome.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{Fact, FactKind, WorkingMemory};
//!
//! let mut wm = WorkingMemory::new();
//! let id = wm.assert_fact(
//!     Fact::new(FactKind::Condicao)
//!         .with("sensor_umidade_solo", 20.0)
//!         .with("tipo_solo", "arenoso"),
//! );
//! assert!(wm.is_current(id, 0));
//! ```

/// Sub-módulo com a implementação de [`Value`].
pub mod value;

/// Sub-módulo com [`Fact`], [`FactKind`], [`ResultRecord`] e [`InputFact`].
pub mod fact;

/// Sub-módulo com a [`WorkingMemory`] — fatos versionados de uma execução.
pub mod working_memory;

// Re-exports para conveniência — permite usar `crate::core::Fact` diretamente.
pub use fact::{Fact, FactKind, InputFact, RecordKind, ResultRecord};
pub use value::Value;
pub use working_memory::{FactId, Generation, StoredFact, WorkingMemory};
