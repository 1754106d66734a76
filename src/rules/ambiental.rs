//! # Alertas Ambientais e Preventivos
//!
//! Nove regras sobre limiares de temperatura, umidade, vento e previsão
//! do tempo. Produzem alertas preventivos (escaldadura, geada,
//! acamamento, perda de floração, míldio, abortamento por calor) ou
//! diagnósticos preventivos (condições favoráveis a fungos,
//! monitoramento de pragas de solo, estresse por frio).

use crate::core::ResultRecord;
use crate::engine::{Action, Condition, Rule};

/// Regras do grupo, na ordem de declaração da base.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "alerta_escaldadura",
            vec![
                Condition::condicao().gt("temperatura_ar", 35.0),
                Condition::condicao().eq("previsao_tempo", "calor_iminente"),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco alto de escaldadura (queima solar)")
                    .recomendacao("Ativar sombrite ou nebulização"),
            ),
        ),
        Rule::new(
            "alerta_geada",
            vec![
                Condition::condicao().eq("previsao_tempo", "geada_iminente"),
                Condition::condicao().lt("temperatura_ar", 3.0),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco iminente de geada")
                    .recomendacao(
                        "Cobrir plantas com manta térmica ou irrigar por aspersão na madrugada",
                    ),
            ),
        ),
        Rule::new(
            "alerta_acamamento",
            vec![Condition::condicao().gt("velocidade_vento", 60.0)],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco de acamamento (tombamento) pelo vento")
                    .recomendacao("Reforçar estacas ou quebra-ventos"),
            ),
        ),
        // preventivo: o histórico da área pesa tanto quanto o clima
        Rule::new(
            "recomendacao_preventiva_fungo",
            vec![
                Condition::condicao().gt("umidade_ar", 85.0),
                Condition::condicao().eq("periodo_chuvoso", true),
                Condition::condicao().eq("historico_area", "alta_incidencia_fungica"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("condicoes_favoraveis_a_fungos_(alta_umidade_e_chuva)")
                    .recomendacao(
                        "[PREVENTIVO] Aplicar fungicida a base de cobre devido à alta umidade.",
                    ),
            ),
        ),
        Rule::new(
            "recomendacao_monitoramento_pragas_solo",
            vec![
                Condition::condicao().eq("estacao_ano", "inicio_primavera"),
                Condition::condicao().gt("temperatura_solo", 18.0),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("risco_de_eclosao_de_pragas_de_solo_(primavera_e_solo_quente)")
                    .recomendacao(
                        "[MONITORAMENTO] Iniciar monitoramento de pragas de solo (ex: larvas).",
                    ),
            ),
        ),
        Rule::new(
            "alerta_perda_floracao",
            vec![
                Condition::condicao().eq("cultura_estagio", "floracao"),
                Condition::condicao().eq("previsao_tempo", "chuva_forte_ou_granizo"),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco de perda de flores e falha na polinização")
                    .recomendacao("Se possível, proteger estruturas (ex: estufas)"),
            ),
        ),
        // míldio gosta de umidade alta com temperatura amena
        Rule::new(
            "alerta_risco_mildio",
            vec![
                Condition::condicao().gt("umidade_ar", 80.0),
                Condition::condicao().between("temperatura_ar", 15.0, 25.0),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco alto de Míldio (Downy Mildew)")
                    .recomendacao(
                        "Condições (alta umidade e temperatura amena) são ideais para Míldio. \
                         Aumente a ventilação/espaçamento e prepare fungicida protetor (ex: \
                         cúprico).",
                    ),
            ),
        ),
        Rule::new(
            "alerta_abortamento_calor",
            vec![
                Condition::condicao().eq("cultura_estagio", "floracao"),
                Condition::condicao().gt("temperatura_ar", 38.0),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco de abortamento floral por calor extremo")
                    .recomendacao(
                        "Temperaturas acima de 38°C podem esterilizar o pólen e causar a \
                         queda de flores. Aumente a frequência de irrigação para resfriar a \
                         planta e, se possível, ative o sombreamento.",
                    ),
            ),
        ),
        Rule::new(
            "diagnostico_estresse_frio",
            vec![
                Condition::condicao().between("temperatura_ar", 5.0, 12.0),
                Condition::condicao().lt("temperatura_solo", 15.0),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("estresse_por_frio_e_solo_frio_(crescimento_lento)")
                    .recomendacao(
                        "O frio no ar e no solo reduz o metabolismo da planta e a absorção \
                         de nutrientes (especialmente Fósforo). Considere usar cobertura de \
                         solo (mulching) para aquecer o solo ou aplicar fertilizante foliar.",
                    ),
            ),
        ),
    ]
}
