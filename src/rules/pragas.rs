//! # Doenças e Pragas
//!
//! Sete regras sobre padrões de observação (pó branco, substância
//! pegajosa, furos irregulares, pontilhados) combinados com observação
//! de insetos e condições de clima/solo.
//!
//! Três delas têm salience `+5`: as co-ocorrências perigosas precisam
//! ser reportadas **antes** das suas componentes isoladas, porque a
//! ordem de tratamento muda quando os quadros se combinam (tratar a
//! praga sugadora antes do fungo; proteger da geada antes de controlar
//! a praga).
//!
//! O oídio isolado **declara** a conclusão (encadeamento) — ela surge no
//! relatório pela consolidação final, sem duplicar quando a co-infecção
//! também foi reportada.

use crate::core::ResultRecord;
use crate::engine::{Action, Condition, Rule};

/// Regras do grupo, na ordem de declaração da base.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "regra_oidio",
            vec![Condition::sintoma().eq("observacao", "po_branco_nas_folhas")],
            Action::Declare {
                causa: "infeccao_fungica_oidio",
                recomendacao:
                    "Aplicar fungicida à base de enxofre ou bicarbonato de potássio.",
            },
        ),
        Rule::new(
            "regra_co_infeccao_oidio_pulgoes",
            vec![
                Condition::sintoma().eq("observacao", "po_branco_nas_folhas"),
                Condition::sintoma().eq(
                    "observacao_inseto",
                    "pequenos_insetos_verdes_ou_pretos_agrupados",
                ),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("co_infeccao_severa_(oidio_e_pulgoes)")
                    .recomendacao(
                        "ATAQUE COMBINADO: A planta está sendo atacada por fungos (Oídio) e \
                         pragas (Pulgões). Trate os Pulgões (sabão inseticida) PRIMEIRO, pois \
                         eles sugam a seiva e enfraquecem a planta. Em seguida, trate o Oídio \
                         (fungicida).",
                    ),
            ),
        )
        .with_salience(5),
        Rule::new(
            "alerta_geada_em_planta_enfraquecida",
            vec![
                Condition::sintoma().eq(
                    "observacao_inseto",
                    "pequenos_insetos_verdes_ou_pretos_agrupados",
                ),
                Condition::condicao().eq("previsao_tempo", "geada_iminente"),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco Critico: Geada em planta enfraquecida por pragas")
                    .recomendacao(
                        "A infestação de pulgões/afídeos já enfraqueceu a planta. A geada \
                         iminente tem alta probabilidade de ser letal. A prioridade máxima é \
                         proteger a planta fisicamente (com manta térmica) ANTES de controlar \
                         a praga.",
                    ),
            ),
        )
        .with_salience(5),
        // pulgões exigem o par fumagina + insetos no mesmo sintoma
        Rule::new(
            "regra_pulgoes",
            vec![
                Condition::sintoma()
                    .eq("observacao", "substancia_pegajosa_escura_nas_folhas")
                    .eq(
                        "observacao_inseto",
                        "pequenos_insetos_verdes_ou_pretos_agrupados",
                    ),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("infestacao_de_pulgoes_(afideos)")
                    .recomendacao_controle("aplicar_oleo_de_neem_ou_sabao_inseticida"),
            ),
        ),
        Rule::new(
            "regra_lagartas",
            vec![
                Condition::sintoma()
                    .eq("observacao", "furos_irregulares_nas_folhas")
                    .eq("detalhe", "presenca_de_lagartas_ou_fezes_escuras"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("ataque_de_lagartas")
                    .recomendacao_controle("aplicar_bacillus_thuringiensis_(BT)"),
            ),
        ),
        // ácaro rajado prospera justamente no clima seco e quente
        Rule::new(
            "regra_acaro_rajado",
            vec![
                Condition::sintoma()
                    .eq("observacao", "folhas_com_pontilhados_prateados_ou_amarelados")
                    .eq("detalhe", "teias_finas_sob_as_folhas"),
                Condition::condicao().eq("clima", "seco_e_quente"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("infestacao_de_acaro_rajado")
                    .recomendacao_controle("aumentar_umidade_relativa_e_aplicar_acaricida"),
            ),
        ),
        Rule::new(
            "alerta_risco_infeccao_dupla",
            vec![
                Condition::sintoma().eq("observacao", "furos_irregulares_nas_folhas"),
                Condition::condicao().eq("solo_umido", "encharcado"),
            ],
            Action::Accumulate(
                ResultRecord::alerta()
                    .risco("Risco Alto de Infecção Secundária (Raiz e Folha)")
                    .recomendacao(
                        "A planta está sofrendo estresse duplo: as raízes estão asfixiadas \
                         (solo encharcado) e as folhas estão danificadas (lagartas). A \
                         prioridade é suspender a irrigação e checar a drenagem. Os furos das \
                         lagartas são uma porta de entrada para fungos/bactérias.",
                    ),
            ),
        )
        .with_salience(5),
    ]
}
