//! # Auditoria — Trilha Append-Only dos Diagnósticos
//!
//! Depois de cada diagnóstico bem-sucedido, o resultado final (já
//! formatado) é anexado a **dois** arquivos sob `data/`:
//!
//! | Arquivo | Formato | Público |
//! |---------|---------|---------|
//! | `auditoria_diagnosticos.txt` | bloco legível com JSON identado | leitura humana |
//! | `auditoria_diagnosticos.jsonl` | um objeto JSON por linha | análise de dados |
//!
//! Cada entrada carrega timestamp local e o id da requisição, para
//! correlação com os logs de tracing. A trilha é **puramente
//! observacional**: falha de escrita é logada e nunca afeta a resposta
//! ao chamador.
//!
//! ## Concorrência
//!
//! Requisições concorrentes compartilham o mesmo par de arquivos; um
//! `parking_lot::Mutex` serializa os appends para que entradas nunca se
//! entrelacem.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::core::ResultRecord;

/// Nome do arquivo de auditoria legível.
const TEXT_LOG: &str = "auditoria_diagnosticos.txt";

/// Nome do arquivo de auditoria estruturada (JSON Lines).
const JSON_LOG: &str = "auditoria_diagnosticos.jsonl";

/// Entrada estruturada do log JSONL.
#[derive(Serialize)]
struct AuditEntry<'a> {
    /// Timestamp local da requisição (`dd/mm/aaaa hh:mm:ss`).
    timestamp: String,
    /// Id da requisição, para correlação com o tracing.
    requisicao: Uuid,
    /// A lista final de registros, como devolvida ao chamador.
    resultados: &'a [ResultRecord],
}

/// Trilha de auditoria append-only.
pub struct AuditLog {
    dir: PathBuf,
    /// Serializa os appends entre requisições concorrentes.
    lock: Mutex<()>,
}

impl AuditLog {
    /// Cria a trilha apontando para um diretório (criado sob demanda).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    /// Anexa uma entrada aos dois arquivos de auditoria.
    pub fn record(&self, requisicao: Uuid, resultados: &[ResultRecord]) -> Result<()> {
        let _guard = self.lock.lock();
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("falha ao criar diretório {}", self.dir.display()))?;

        let agora = chrono::Local::now();
        let timestamp = agora.format("%d/%m/%Y %H:%M:%S").to_string();

        // bloco legível
        let json_identado = serde_json::to_string_pretty(resultados)
            .context("falha ao serializar resultados para auditoria")?;
        let bloco = format!(
            "AUDITORIA DE DIAGNÓSTICO\n\
             ========================\n\
             Data/Hora: {timestamp}\n\
             Requisição: {requisicao}\n\
             Resultado do Diagnóstico:\n\
             {json_identado}\n\
             ==================================================\n\n"
        );
        self.append(TEXT_LOG, bloco.as_bytes())?;

        // linha estruturada
        let entry = AuditEntry {
            timestamp,
            requisicao,
            resultados,
        };
        let mut linha = serde_json::to_string(&entry)
            .context("falha ao serializar entrada JSONL de auditoria")?;
        linha.push('\n');
        self.append(JSON_LOG, linha.as_bytes())?;

        tracing::debug!(requisicao = %requisicao, "auditoria registrada");
        Ok(())
    }

    fn append(&self, arquivo: &str, conteudo: &[u8]) -> Result<()> {
        let caminho = self.dir.join(arquivo);
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&caminho)
            .with_context(|| format!("falha ao abrir {} para append", caminho.display()))?;
        f.write_all(conteudo)
            .with_context(|| format!("falha ao escrever em {}", caminho.display()))?;
        Ok(())
    }
}
