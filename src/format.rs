//! # Formatação de Saída — Tokens Internos para Texto Legível
//!
//! O motor trabalha com tokens snake_case (`deficiencia_de_magnesio_(Mg)`);
//! a borda HTTP entrega frases capitalizadas
//! (`Deficiencia de magnesio (mg)`). A conversão é puramente
//! apresentacional: nenhum campo muda de papel, nenhum registro é criado
//! ou removido.
//!
//! ## Regra de Formatação
//!
//! 1. underscores viram espaços;
//! 2. a primeira letra vira maiúscula e **todo o resto** vira minúscula
//!    (frases já escritas por extenso também são normalizadas assim);
//! 3. texto vazio vira ausência: o campo é omitido da saída.

use crate::core::ResultRecord;

/// Converte um token interno em frase legível. Vazio vira `None`.
pub fn humanize(texto: &str) -> Option<String> {
    if texto.is_empty() {
        return None;
    }
    let espacado = texto.replace('_', " ");
    let mut chars = espacado.chars();
    let primeiro = chars.next()?;
    let mut resultado: String = primeiro.to_uppercase().collect();
    resultado.extend(chars.flat_map(char::to_lowercase));
    Some(resultado)
}

/// Aplica [`humanize`] a todos os campos textuais de um registro,
/// preservando o `tipo`.
pub fn humanize_record(record: &ResultRecord) -> ResultRecord {
    let apply = |campo: &Option<String>| campo.as_deref().and_then(humanize);
    ResultRecord {
        tipo: record.tipo,
        causa: apply(&record.causa),
        risco: apply(&record.risco),
        recomendacao: apply(&record.recomendacao),
        recomendacao_controle: apply(&record.recomendacao_controle),
        recomendacao_corretiva: apply(&record.recomendacao_corretiva),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── humanize ──────────────────────────────────────────────

    #[test]
    fn snake_case_becomes_capitalized_phrase() {
        assert_eq!(
            humanize("deficiencia_de_magnesio_(Mg)").as_deref(),
            Some("Deficiencia de magnesio (mg)")
        );
        assert_eq!(
            humanize("irrigar_agora_ciclo_curto").as_deref(),
            Some("Irrigar agora ciclo curto")
        );
    }

    #[test]
    fn full_sentences_are_normalized_too() {
        assert_eq!(
            humanize("ATAQUE COMBINADO: tratar primeiro").as_deref(),
            Some("Ataque combinado: tratar primeiro")
        );
    }

    #[test]
    fn empty_text_becomes_absence() {
        assert_eq!(humanize(""), None);
    }

    #[test]
    fn accents_survive_the_case_folding() {
        assert_eq!(
            humanize("infestacao_de_acaro_rajado").as_deref(),
            Some("Infestacao de acaro rajado")
        );
        assert_eq!(humanize("míldio").as_deref(), Some("Míldio"));
    }

    // ─── humanize_record ───────────────────────────────────────

    #[test]
    fn record_fields_are_formatted_and_absent_stay_absent() {
        let rec = ResultRecord::diagnostico()
            .causa("baixa_umidade_em_solo_arenoso")
            .recomendacao("irrigar_agora_ciclo_curto");
        let formatted = humanize_record(&rec);
        assert_eq!(
            formatted.causa.as_deref(),
            Some("Baixa umidade em solo arenoso")
        );
        assert!(formatted.risco.is_none());
        assert!(formatted.recomendacao_corretiva.is_none());
        assert_eq!(formatted.tipo, rec.tipo);
    }
}
