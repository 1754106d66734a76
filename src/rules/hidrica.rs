//! # Gestão Hídrica e pH do Solo
//!
//! Sete regras: momento de irrigar por tipo de solo, distinção entre
//! estresse hídrico e térmico, asfixia radicular por encharcamento e as
//! correções de pH — incluindo a regra **encadeada** que só dispara
//! quando uma deficiência de cálcio ou magnésio já foi concluída e o pH
//! está baixo, produzindo um registro apenas corretivo (sem `causa`).

use crate::core::ResultRecord;
use crate::engine::{Action, Condition, Rule};

/// Regras do grupo, na ordem de declaração da base.
pub fn rules() -> Vec<Rule> {
    vec![
        // solo arenoso drena rápido: o limiar de irrigação é mais baixo
        Rule::new(
            "regra_irrigacao_solo_arenoso",
            vec![
                Condition::condicao().lt("sensor_umidade_solo", 30.0),
                Condition::condicao().eq("tipo_solo", "arenoso"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("baixa_umidade_em_solo_arenoso")
                    .recomendacao("irrigar_agora_ciclo_curto"),
            ),
        ),
        Rule::new(
            "regra_irrigacao_solo_argiloso",
            vec![
                Condition::condicao().lt("sensor_umidade_solo", 40.0),
                Condition::condicao().eq("tipo_solo", "argiloso"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("baixa_umidade_em_solo_argiloso")
                    .recomendacao("irrigar_agora_ciclo_longo"),
            ),
        ),
        // murcha de manhã com solo seco: falta de água, não calor
        Rule::new(
            "regra_estresse_hidrico_severo",
            vec![
                Condition::sintoma().eq("planta_aparencia", "murcha_pela_manha"),
                Condition::condicao().eq("solo_umido", "seco"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("estresse_hidrico_severo")
                    .recomendacao("irrigar_imediatamente"),
            ),
        ),
        // murcha à tarde com solo úmido e ar quente: estresse térmico,
        // irrigar agora só pioraria
        Rule::new(
            "regra_estresse_termico",
            vec![
                Condition::sintoma().eq("planta_aparencia", "murcha_pela_tarde"),
                Condition::condicao().eq("solo_umido", "umido"),
                Condition::condicao().gt("temperatura_ar", 30.0),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("estresse_termico")
                    .recomendacao("nao_irrigar_agora_verificar_sombreamento"),
            ),
        ),
        Rule::new(
            "regra_excesso_agua",
            vec![
                Condition::condicao().eq("solo_umido", "encharcado"),
                Condition::sintoma().eq("planta_folhas_baixas", "amareladas"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("excesso_de_agua_asfixia_radicular")
                    .recomendacao("suspender_irrigacao_e_checar_drenagem"),
            ),
        ),
        Rule::new(
            "regra_solo_alcalino",
            vec![Condition::condicao().gt("ph_solo", 7.5)],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("solo_alcalino_(pH_alto)")
                    .recomendacao(
                        "pH alto detectado. Isso pode travar a absorcao de micronutrientes \
                         (como Ferro). Aplicar enxofre elementar ou sulfato de amonio para \
                         reduzir o pH.",
                    ),
            ),
        ),
        // encadeamento: depende de uma deficiência de Ca ou Mg já
        // concluída; o registro só carrega a correção
        Rule::new(
            "regra_corrigir_ph_para_ca_mg",
            vec![
                Condition::diagnostico().eq("causa", "deficiencia_de_calcio_(Ca)"),
                Condition::condicao().lt("ph_solo", 5.5),
            ],
            Action::Accumulate(ResultRecord::diagnostico().recomendacao_corretiva(
                "pH baixo detectado. Aplicar calcário dolomítico (corrige pH e fornece Ca/Mg).",
            )),
        )
        .or(vec![
            Condition::diagnostico().eq("causa", "deficiencia_de_magnesio_(Mg)"),
            Condition::condicao().lt("ph_solo", 5.5),
        ]),
    ]
}
