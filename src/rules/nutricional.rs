//! # Diagnóstico Nutricional
//!
//! Sete regras que leem a "assinatura foliar" de cada deficiência: a
//! posição da folha afetada (velha ou nova) indica se o nutriente é
//! móvel na planta, e o padrão de cor/borda aponta o elemento.
//!
//! | Folhas | Padrão | Deficiência |
//! |--------|--------|-------------|
//! | velhas | amarelada uniforme | Nitrogênio (N) |
//! | velhas | verde escura arroxeada | Fósforo (P) |
//! | velhas | bordas queimadas e secas | Potássio (K) |
//! | velhas | amarelada entre nervuras | Magnésio (Mg) |
//! | novas | amarelada entre nervuras | Ferro (Fe) |
//! | novas | deformadas, ponto de crescimento morto | Cálcio (Ca) |
//! | novas | amarelada uniforme completa | Enxofre (S) |
//!
//! Magnésio e cálcio **declaram** um fato `Diagnostico` em vez de
//! acumular diretamente: a conclusão precisa ficar visível como premissa
//! para a regra encadeada de correção de pH
//! ([`hidrica`](super::hidrica)). A consolidação final garante que elas
//! apareçam no relatório mesmo quando o encadeamento não acontece.

use crate::core::ResultRecord;
use crate::engine::{Action, Condition, Rule};

/// Regras do grupo, na ordem de declaração da base.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "regra_deficiencia_nitrogenio",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_velhas")
                    .eq("cor", "amarelada_uniforme"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("deficiencia_de_nitrogenio_(N)")
                    .recomendacao(
                        "Aplicar fertilizante nitrogenado (ex: ureia, nitrato de amônio).",
                    ),
            ),
        ),
        Rule::new(
            "regra_deficiencia_fosforo",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_velhas")
                    .eq("cor", "verde_escura_com_tons_arroxeados"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("deficiencia_de_fosforo_(P)")
                    .recomendacao(
                        "Aplicar fertilizante fosfatado (ex: superfosfato simples/triplo).",
                    ),
            ),
        ),
        Rule::new(
            "regra_deficiencia_potassio",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_velhas")
                    .eq("aspecto", "bordas_queimadas_e_secas"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("deficiencia_de_potassio_(K)")
                    .recomendacao("Aplicar fertilizante potássico (ex: cloreto de potássio)."),
            ),
        ),
        // declara em vez de acumular: premissa da correção de pH
        Rule::new(
            "regra_deficiencia_magnesio",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_velhas")
                    .eq("cor", "amarelada_entre_nervuras"),
            ],
            Action::Declare {
                causa: "deficiencia_de_magnesio_(Mg)",
                recomendacao: "Aplicar sulfato de magnésio ou calcário dolomítico (se pH baixo).",
            },
        ),
        Rule::new(
            "regra_deficiencia_ferro",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_novas")
                    .eq("cor", "amarelada_entre_nervuras"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("deficiencia_de_ferro_(Fe)")
                    .recomendacao("Aplicar quelato de ferro (Fe-EDTA) no solo ou via foliar."),
            ),
        ),
        // declara em vez de acumular: premissa da correção de pH
        Rule::new(
            "regra_deficiencia_calcio",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_novas")
                    .eq("aspecto", "deformadas_ou_retorcidas")
                    .eq("ponto_crescimento", "morto"),
            ],
            Action::Declare {
                causa: "deficiencia_de_calcio_(Ca)",
                recomendacao: "Aplicar gesso agrícola ou nitrato de cálcio.",
            },
        ),
        Rule::new(
            "regra_deficiencia_enxofre",
            vec![
                Condition::sintoma()
                    .eq("local", "folhas_novas")
                    .eq("cor", "amarelada_uniforme_completa"),
            ],
            Action::Accumulate(
                ResultRecord::diagnostico()
                    .causa("deficiencia_de_enxofre_(S)")
                    .recomendacao(
                        "Aplicar sulfato de amônio ou gesso agrícola (fontes de enxofre).",
                    ),
            ),
        ),
    ]
}
