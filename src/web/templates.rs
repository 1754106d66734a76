//! # Template Maud — A Página do Construtor de Fatos
//!
//! Página única renderizada no servidor com
//! [`maud`](https://maud.lambda.xyz/): o usuário acumula observações
//! (sintomas) e leituras (condições), dispara o diagnóstico e vê o
//! relatório — tudo contra a API JSON de `POST /diagnosticar`.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────── nav-bar ─────────────────┐
//! │ 🌱 AgroDiagnóstico          ● base pronta │
//! ├───────────────────┬──────────────────────┤
//! │ Adicionar Fatos   │ Fatos Acumulados     │
//! │  • observações    │  [Sintoma] ...       │
//! │  • leituras       │  [Condicao] ...      │
//! │                   ├──────────────────────┤
//! │                   │ Relatório            │
//! │ [Diagnosticar]    │  Diagnósticos/Alertas│
//! └───────────────────┴──────────────────────┘
//! ```
//!
//! O JavaScript inline apenas acumula fatos e conversa com a API;
//! nenhuma regra de domínio vive no frontend.

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Observações discretas oferecidas no seletor de sintomas.
///
/// Cada entrada é (rótulo exibido, JSON dos dados do fato `Sintoma`).
const SINTOMAS: &[(&str, &str)] = &[
    (
        "Folhas velhas amareladas por igual",
        r#"{"local":"folhas_velhas","cor":"amarelada_uniforme"}"#,
    ),
    (
        "Folhas velhas verde-escuras com tons arroxeados",
        r#"{"local":"folhas_velhas","cor":"verde_escura_com_tons_arroxeados"}"#,
    ),
    (
        "Folhas velhas com bordas queimadas e secas",
        r#"{"local":"folhas_velhas","aspecto":"bordas_queimadas_e_secas"}"#,
    ),
    (
        "Folhas velhas amareladas entre as nervuras",
        r#"{"local":"folhas_velhas","cor":"amarelada_entre_nervuras"}"#,
    ),
    (
        "Folhas novas amareladas entre as nervuras",
        r#"{"local":"folhas_novas","cor":"amarelada_entre_nervuras"}"#,
    ),
    (
        "Folhas novas deformadas, ponto de crescimento morto",
        r#"{"local":"folhas_novas","aspecto":"deformadas_ou_retorcidas","ponto_crescimento":"morto"}"#,
    ),
    (
        "Folhas novas inteiras amareladas",
        r#"{"local":"folhas_novas","cor":"amarelada_uniforme_completa"}"#,
    ),
    (
        "Planta murcha pela manhã",
        r#"{"planta_aparencia":"murcha_pela_manha"}"#,
    ),
    (
        "Planta murcha pela tarde",
        r#"{"planta_aparencia":"murcha_pela_tarde"}"#,
    ),
    (
        "Folhas baixas amareladas",
        r#"{"planta_folhas_baixas":"amareladas"}"#,
    ),
    (
        "Pó branco nas folhas",
        r#"{"observacao":"po_branco_nas_folhas"}"#,
    ),
    (
        "Substância pegajosa escura + pequenos insetos agrupados",
        r#"{"observacao":"substancia_pegajosa_escura_nas_folhas","observacao_inseto":"pequenos_insetos_verdes_ou_pretos_agrupados"}"#,
    ),
    (
        "Pequenos insetos verdes ou pretos agrupados",
        r#"{"observacao_inseto":"pequenos_insetos_verdes_ou_pretos_agrupados"}"#,
    ),
    (
        "Furos irregulares nas folhas",
        r#"{"observacao":"furos_irregulares_nas_folhas"}"#,
    ),
    (
        "Furos irregulares + lagartas ou fezes escuras",
        r#"{"observacao":"furos_irregulares_nas_folhas","detalhe":"presenca_de_lagartas_ou_fezes_escuras"}"#,
    ),
    (
        "Pontilhados prateados + teias finas sob as folhas",
        r#"{"observacao":"folhas_com_pontilhados_prateados_ou_amarelados","detalhe":"teias_finas_sob_as_folhas"}"#,
    ),
];

/// Condições discretas oferecidas no seletor de leituras.
const CONDICOES: &[(&str, &str)] = &[
    ("Solo arenoso", r#"{"tipo_solo":"arenoso"}"#),
    ("Solo argiloso", r#"{"tipo_solo":"argiloso"}"#),
    ("Solo seco ao toque", r#"{"solo_umido":"seco"}"#),
    ("Solo úmido ao toque", r#"{"solo_umido":"umido"}"#),
    ("Solo encharcado", r#"{"solo_umido":"encharcado"}"#),
    ("Previsão: geada iminente", r#"{"previsao_tempo":"geada_iminente"}"#),
    ("Previsão: calor iminente", r#"{"previsao_tempo":"calor_iminente"}"#),
    (
        "Previsão: chuva forte ou granizo",
        r#"{"previsao_tempo":"chuva_forte_ou_granizo"}"#,
    ),
    ("Clima seco e quente", r#"{"clima":"seco_e_quente"}"#),
    ("Período chuvoso", r#"{"periodo_chuvoso":true}"#),
    (
        "Histórico da área: alta incidência fúngica",
        r#"{"historico_area":"alta_incidencia_fungica"}"#,
    ),
    ("Início da primavera", r#"{"estacao_ano":"inicio_primavera"}"#),
    ("Cultura em floração", r#"{"cultura_estagio":"floracao"}"#),
];

/// Leituras numéricas de sensor oferecidas no formulário.
const LEITURAS: &[(&str, &str)] = &[
    ("sensor_umidade_solo", "Umidade do solo (%)"),
    ("ph_solo", "pH do solo"),
    ("temperatura_ar", "Temperatura do ar (°C)"),
    ("temperatura_solo", "Temperatura do solo (°C)"),
    ("umidade_ar", "Umidade do ar (%)"),
    ("velocidade_vento", "Velocidade do vento (km/h)"),
];

/// Página principal — construtor de fatos + relatório.
pub fn full_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "AgroDiagnóstico — Sistema Especialista Agrícola" }
                link rel="stylesheet" href="/assets/style.css";
            }
            body {
                div class="app-shell" {
                    nav class="nav-bar" {
                        span class="nav-brand" {
                            span class="nav-brand-icon" { "🌱" }
                            span class="nav-brand-text" { "Agro" em { "Diagnóstico" } }
                        }
                        div class="nav-status" {
                            span class="nav-status-dot" id="status-dot" {}
                            span id="status-text" { "verificando base..." }
                        }
                    }

                    div class="app-container" {
                        // Painel esquerdo: construtor de fatos
                        div class="panel facts-panel" {
                            h2 { "Adicionar Fatos" }

                            div class="field-group" {
                                label for="sintoma-select" { "Sintoma observado" }
                                select id="sintoma-select" {
                                    option value="" { "— escolha uma observação —" }
                                    @for (rotulo, dados) in SINTOMAS {
                                        option value=(dados) { (rotulo) }
                                    }
                                }
                                button id="btn-add-sintoma" { "Adicionar sintoma" }
                            }

                            div class="field-group" {
                                label for="condicao-select" { "Condição do ambiente/solo" }
                                select id="condicao-select" {
                                    option value="" { "— escolha uma condição —" }
                                    @for (rotulo, dados) in CONDICOES {
                                        option value=(dados) { (rotulo) }
                                    }
                                }
                                button id="btn-add-condicao" { "Adicionar condição" }
                            }

                            div class="field-group" {
                                label for="leitura-select" { "Leitura de sensor" }
                                select id="leitura-select" {
                                    @for (atributo, rotulo) in LEITURAS {
                                        option value=(atributo) { (rotulo) }
                                    }
                                }
                                input id="leitura-valor" type="number" step="0.1"
                                    placeholder="valor da leitura";
                                button id="btn-add-leitura" { "Adicionar leitura" }
                            }

                            div class="actions" {
                                button id="btn-diagnosticar" class="primary" { "Diagnosticar" }
                                button id="btn-limpar" { "Limpar sessão" }
                            }
                        }

                        // Painel direito: fatos acumulados + relatório
                        div class="panel results-panel" {
                            h2 { "Fatos Acumulados" }
                            ul id="fatos-acumulados" {}
                            h2 { "Relatório" }
                            div id="resultados" {
                                p class="placeholder" {
                                    "Adicione fatos e clique em Diagnosticar."
                                }
                            }
                        }
                    }
                }

                script { (PreEscaped(APP_SCRIPT)) }
            }
        }
    }
}

/// JavaScript inline da página: acumula fatos, chama a API e renderiza
/// o relatório. Sem regra de domínio — só transporte e exibição.
const APP_SCRIPT: &str = r#"
const fatos = [];
const listaUI = document.getElementById('fatos-acumulados');
const resultadosUI = document.getElementById('resultados');

function adicionarFato(tipo, dados, descricao) {
    fatos.push({ tipo: tipo, dados: dados });
    const li = document.createElement('li');
    li.textContent = '[' + tipo + '] ' + descricao;
    listaUI.appendChild(li);
}

function adicionarDeSelect(selectId, tipo) {
    const select = document.getElementById(selectId);
    if (!select.value) return;
    const rotulo = select.options[select.selectedIndex].textContent;
    adicionarFato(tipo, JSON.parse(select.value), rotulo);
    select.value = '';
}

document.getElementById('btn-add-sintoma').onclick =
    () => adicionarDeSelect('sintoma-select', 'Sintoma');
document.getElementById('btn-add-condicao').onclick =
    () => adicionarDeSelect('condicao-select', 'Condicao');

document.getElementById('btn-add-leitura').onclick = () => {
    const select = document.getElementById('leitura-select');
    const input = document.getElementById('leitura-valor');
    if (input.value === '') return;
    const dados = {};
    dados[select.value] = parseFloat(input.value);
    const rotulo = select.options[select.selectedIndex].textContent;
    adicionarFato('Condicao', dados, rotulo + ' = ' + input.value);
    input.value = '';
};

document.getElementById('btn-limpar').onclick = () => {
    fatos.length = 0;
    listaUI.innerHTML = '';
    resultadosUI.innerHTML = '<p class="placeholder">Sessão limpa.</p>';
};

function renderRegistro(r) {
    const div = document.createElement('div');
    div.className = 'registro ' + (r.tipo === 'Alerta' ? 'alerta' : 'diagnostico');
    const titulo = document.createElement('h3');
    titulo.textContent = r.tipo === 'Alerta' ? '⚠️ Alerta' : '🔎 Diagnóstico';
    div.appendChild(titulo);
    const campos = [
        ['causa', 'Causa provável'],
        ['risco', 'Risco'],
        ['recomendacao', 'Recomendação'],
        ['recomendacao_controle', 'Controle específico'],
        ['recomendacao_corretiva', 'Correção específica'],
    ];
    for (const [chave, rotulo] of campos) {
        if (r[chave]) {
            const p = document.createElement('p');
            p.innerHTML = '<strong>' + rotulo + ':</strong> ';
            p.appendChild(document.createTextNode(r[chave]));
            div.appendChild(p);
        }
    }
    return div;
}

document.getElementById('btn-diagnosticar').onclick = async () => {
    resultadosUI.innerHTML = '<p class="placeholder">Analisando...</p>';
    try {
        const resp = await fetch('/diagnosticar', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(fatos),
        });
        const corpo = await resp.json();
        resultadosUI.innerHTML = '';
        if (!resp.ok) {
            resultadosUI.innerHTML =
                '<p class="erro">Erro: ' + (corpo.erro || resp.status) + '</p>';
            return;
        }
        if (corpo.length === 0) {
            resultadosUI.innerHTML =
                '<p class="placeholder">Nenhuma conclusão pôde ser determinada ' +
                'com os fatos fornecidos.</p>';
            return;
        }
        for (const registro of corpo) {
            resultadosUI.appendChild(renderRegistro(registro));
        }
    } catch (e) {
        resultadosUI.innerHTML = '<p class="erro">Falha na requisição: ' + e + '</p>';
    }
};

// sonda de prontidão da base de regras
fetch('/status')
    .then((r) => r.json())
    .then((s) => {
        document.getElementById('status-dot').classList.add('ready');
        document.getElementById('status-text').textContent =
            'base pronta (' + s.regras + ' regras)';
    })
    .catch(() => {
        document.getElementById('status-text').textContent = 'base indisponível';
    });
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_templates_carry_valid_json() {
        for (_, dados) in SINTOMAS.iter().chain(CONDICOES.iter()) {
            let parsed: serde_json::Value = serde_json::from_str(dados).unwrap();
            assert!(parsed.is_object(), "dados de fato devem ser objetos");
        }
    }

    #[test]
    fn page_renders_with_all_selectors() {
        let html = full_page().into_string();
        assert!(html.contains("sintoma-select"));
        assert!(html.contains("condicao-select"));
        assert!(html.contains("btn-diagnosticar"));
        assert!(html.contains("sensor_umidade_solo"));
    }
}
